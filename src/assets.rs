use rust_embed::RustEmbed;
use std::borrow::Cow;

// Sprite sheets bundled into the binary
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

pub fn get_asset_bytes(name: &str) -> Option<Cow<'static, [u8]>> {
    Asset::get(name).map(|f| f.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_is_none() {
        assert!(get_asset_bytes("no-such-sheet.png").is_none());
    }
}
