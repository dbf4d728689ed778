//! Headless outlet map.
//!
//! [`MapApp`] composes the outlet store, the map scene, the info panel and the
//! query router. All state lives in the `MapApp` value and is mutated through
//! `&mut self`; nothing here is global.

pub mod panel;
pub mod router;
pub mod scene;
pub mod shell;
pub mod store;

pub use panel::InfoPanel;
pub use router::{route, SearchResults};
pub use scene::{Layer, LayerId, LayerKind, MapScene, MapView, INITIAL_VIEW};
pub use shell::MapApp;
pub use store::{OutletStore, StoredOutlet, StoredOverlap};
