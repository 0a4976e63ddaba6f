use rust_embed::RustEmbed;
use std::borrow::Cow;

pub const OFFLINE_PAGE: &str = "offline.html";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Static text resources looked up by a stable key: the built-in strategy
/// templates (`CacheFirstSafe.js`, ...) and [`OFFLINE_PAGE`].
pub trait ResourceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Cow<'static, str>>;
}

/// Resources compiled into the binary from `assets/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedResources;

impl ResourceStore for EmbeddedResources {
    fn get(&self, key: &str) -> Option<Cow<'static, str>> {
        let file = Assets::get(key)?;

        match file.data {
            Cow::Borrowed(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Cow::Owned(bytes) => String::from_utf8(bytes).ok().map(Cow::Owned),
        }
    }
}
