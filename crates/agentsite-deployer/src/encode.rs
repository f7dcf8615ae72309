//! Encoding file bundles into the platform wire format.

use agentsite_core::FileBundle;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// Extensions whose content arrives already base64-encoded from upstream.
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// One file in the shape the create-deployment call expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFile {
    pub file: String,
    pub data: String,
    pub encoding: &'static str,
}

/// Convert a bundle into the list of file records the create call expects.
///
/// Image content passes through untouched (it is base64 already); everything
/// else is treated as text and transcoded. Pure; output order follows the
/// bundle's sorted order.
pub fn encode_bundle(bundle: &FileBundle) -> Vec<EncodedFile> {
    bundle
        .iter()
        .map(|(file, content)| {
            let data = if is_image(file) {
                content.to_string()
            } else {
                STANDARD.encode(content.as_bytes())
            };
            EncodedFile {
                file: file.to_string(),
                data,
                encoding: "base64",
            }
        })
        .collect()
}

fn is_image(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|image| ext.eq_ignore_ascii_case(image))
        })
}
