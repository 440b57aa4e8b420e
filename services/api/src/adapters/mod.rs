pub mod memory;

pub use memory::InMemoryRosterAdapter;
