pub mod loader;
pub mod records;

pub use loader::{
    load_dispatcher, load_dispatcher_from_paths, load_drivers, load_passengers, load_trips,
    ImportError,
};
