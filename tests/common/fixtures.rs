//! Test fixtures - reusable inventories and configs.

/// Three hosts over two partitions
pub const THREE_HOSTS: &str = r#"
[[hosts]]
id = "node1"
address = "10.0.0.1"
partition = "dc1"
memory = "8G"

[[hosts]]
id = "node2"
address = "10.0.0.2"
partition = "dc1"
memory = "8G"

[[hosts]]
id = "node3"
address = "10.0.1.1"
partition = "dc2"
memory = "8G"
"#;

/// `THREE_HOSTS` plus a fourth host in a third partition
pub const FOUR_HOSTS: &str = r#"
[[hosts]]
id = "node1"
address = "10.0.0.1"
partition = "dc1"
memory = "8G"

[[hosts]]
id = "node2"
address = "10.0.0.2"
partition = "dc1"
memory = "8G"

[[hosts]]
id = "node3"
address = "10.0.1.1"
partition = "dc2"
memory = "8G"

[[hosts]]
id = "node4"
address = "10.0.2.1"
partition = "dc3"
memory = "8G"
"#;

pub const SINGLE_HOST: &str = r#"
[[hosts]]
id = "solo"
address = "192.168.1.10"
memory = "4G"
"#;

/// Project config with a small pool and a named cluster
pub const PROJECT_CONFIG: &str = r#"
[cluster]
name = "logs"

[ports]
low = 5000
high = 5010
"#;
