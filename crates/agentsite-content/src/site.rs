//! Website generation: backend-assisted with a built-in template fallback.

use std::sync::LazyLock;

use agentsite_core::{Error, FileBundle, Result};
use askama::Template;
use regex::Regex;
use tracing::{info, warn};

use crate::generator::ContentGenerator;

pub const INDEX_FILE: &str = "index.html";
pub const STYLE_FILE: &str = "style.css";
pub const SCRIPT_FILE: &str = "script.js";

static STYLE_ASSET: &str = include_str!("../assets/site.css");
static SCRIPT_ASSET: &str = include_str!("../assets/site.js");

static HTML_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```html\n([\s\S]*?)\n```").expect("html block regex is valid"));
static CSS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```css\n([\s\S]*?)\n```").expect("css block regex is valid"));
static JS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:javascript|js)\n([\s\S]*?)\n```").expect("js block regex is valid")
});

/// Details describing one insurance agent's site.
#[derive(Debug, Clone, Default)]
pub struct AgentProfile {
    pub agent_name: String,
    pub business_name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    /// Filename of the uploaded logo, if any. The site references it
    /// verbatim, so the same name must exist in the final bundle.
    pub logo_file_name: Option<String>,
    /// Filenames of uploaded office photos, same contract as the logo.
    pub office_photo_file_names: Vec<String>,
}

#[derive(Template)]
#[template(path = "site.html")]
struct SiteTemplate<'a> {
    profile: &'a AgentProfile,
}

struct SiteFiles {
    html: String,
    css: String,
    js: String,
}

fn template_files(profile: &AgentProfile) -> Result<SiteFiles> {
    let html = SiteTemplate { profile }
        .render()
        .map_err(|e| Error::Generation(format!("site template rendering failed: {e}")))?;
    Ok(SiteFiles {
        html,
        css: STYLE_ASSET.to_string(),
        js: SCRIPT_ASSET.to_string(),
    })
}

fn bundle_from(files: SiteFiles) -> FileBundle {
    let mut bundle = FileBundle::new();
    bundle.insert(INDEX_FILE, files.html);
    bundle.insert(STYLE_FILE, files.css);
    bundle.insert(SCRIPT_FILE, files.js);
    bundle
}

/// Render the three site files from the built-in template.
pub fn template_site(profile: &AgentProfile) -> Result<FileBundle> {
    template_files(profile).map(bundle_from)
}

/// Generate the site through the content backend.
///
/// The backend is asked for three fenced blocks (html/css/js); any block it
/// omits, and any outright failure, falls back to the built-in template so
/// a bundle always comes out.
pub async fn generate_site(
    generator: &dyn ContentGenerator,
    profile: &AgentProfile,
) -> Result<FileBundle> {
    let fallback = template_files(profile)?;

    let text = match generator.generate(&website_prompt(profile)).await {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "site generation failed, using the built-in template");
            return Ok(bundle_from(fallback));
        }
    };

    let html = fenced_block(&HTML_BLOCK, &text);
    let css = fenced_block(&CSS_BLOCK, &text);
    let js = fenced_block(&JS_BLOCK, &text);
    info!(
        html = html.is_some(),
        css = css.is_some(),
        js = js.is_some(),
        "parsed generated site blocks"
    );

    Ok(bundle_from(SiteFiles {
        html: html.unwrap_or(fallback.html),
        css: css.unwrap_or(fallback.css),
        js: js.unwrap_or(fallback.js),
    }))
}

fn fenced_block(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn website_prompt(profile: &AgentProfile) -> String {
    let logo_line = match &profile.logo_file_name {
        Some(name) => format!("- Logo file: {name} (use this exact filename in the HTML)"),
        None => "- No logo provided (do not include logo img tags)".to_string(),
    };
    let photos_line = if profile.office_photo_file_names.is_empty() {
        "- No office photos provided (do not include office photo img tags)".to_string()
    } else {
        format!(
            "- Office photos: {} (use these exact filenames in the HTML)",
            profile.office_photo_file_names.join(", ")
        )
    };

    format!(
        "Create a complete professional insurance agent website for the following agent:\n\
         \n\
         Agent details:\n\
         - Name: {agent}\n\
         - Business: {business}\n\
         - Address: {address}\n\
         - Phone: {phone}\n\
         - Email: {email}\n\
         {logo_line}\n\
         {photos_line}\n\
         \n\
         Image rules:\n\
         - Do NOT use placeholder images, stock photos, or external image URLs\n\
         - Only reference the specific image files listed above, if any\n\
         - If no images are provided, use CSS gradients for visual appeal\n\
         \n\
         Requirements:\n\
         - Three separate files: HTML, CSS, and JavaScript\n\
         - Modern, mobile-first responsive layout with CSS Grid/Flexbox\n\
         - Sections: Hero, About, Services, Contact\n\
         - Services: Auto, Home, Life, and Business insurance\n\
         - Professional color scheme (blues, whites, grays)\n\
         - The contact section lists the details above; no contact form\n\
         - Smooth scrolling and light interactive touches\n\
         \n\
         Provide the code in this exact format:\n\
         ```html\n\
         [HTML content here]\n\
         ```\n\
         \n\
         ```css\n\
         [CSS content here]\n\
         ```\n\
         \n\
         ```javascript\n\
         [JavaScript content here]\n\
         ```\n\
         \n\
         Make it look professional and trustworthy for an insurance business.",
        agent = profile.agent_name,
        business = profile.business_name,
        address = profile.address,
        phone = profile.contact_number,
        email = profile.email,
    )
}
