//! Domain Layer
//!
//! The assembly engine proper - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Hosts, instances, endpoints, artifacts and the two
//!   topology phases (builder and frozen)
//! - `value_objects/` - Identifiers, roles, images, port pool, hashes
//! - `services/` - Quorum, factory, links, ports, resolver, differ
//! - `policies/` - Per-role image, memory, storage and gateway rules
//! - `ports/` - Interfaces for inventories, templates and event sinks
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Inventories and templates arrive through ports
//! 2. **Two phases** - Everything mutable happens before the freeze;
//!    deferred artifacts only see the frozen topology
//! 3. **Arena** - Links point at instances by id, never by reference

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
