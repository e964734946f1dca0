mod store;

pub use self::store::{
    Store, StoreError, StoreKey, StoreOperation, StoreOutput, StoreResult, MAX_KEY_LENGTH,
    MAX_VALUE_SIZE,
};

// Render and Http come from Crux directly; they already provide everything
// the directory viewer needs.
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

pub type AppHttp = Http<Event>;
pub type AppStore = Store<Event>;
pub type AppRender = Render<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub store: Store<Event>,
}
