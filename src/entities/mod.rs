//! Entity module - Contains the SeaORM entity definitions for the database.
//! Records themselves are not tables; each category lives as a serialized
//! sequence inside a single `partitions` row.

pub mod partition;

pub use partition::{Column as PartitionColumn, Entity as Partition, Model as PartitionModel};
