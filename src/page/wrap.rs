//! Providers: the fixed layers wrapped around every rendered page.
//!
//! ```text
//! Document ─┐
//!  Analytics ─┐
//!   Theme ─┐
//!    Comments ─┐
//!     page body
//! ```

use std::fmt::Write as _;

use super::PageElement;
use crate::{
    config::{SiteConfig, pages::normalize},
    sw,
    utils::{
        html::{escape, link},
        slug::route_url,
    },
};

const STYLE: &str = include_str!("../embed/page/style.css");

/// One wrapping layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Disqus thread, only on pages that ask for it
    Comments,
    /// Site chrome and tag colors
    Theme,
    /// Google Analytics snippet
    Analytics,
    /// html/head/body and service-worker registration
    Document,
}

/// Application order, innermost first.
pub const PROVIDERS: [Provider; 4] = [
    Provider::Comments,
    Provider::Theme,
    Provider::Analytics,
    Provider::Document,
];

impl Provider {
    /// Wrap `inner` with this layer. `page` carries the page's own metadata.
    fn apply(self, inner: String, page: &PageElement, config: &SiteConfig) -> String {
        match self {
            Self::Comments => comments(inner, page, config),
            Self::Theme => theme(inner, config),
            Self::Analytics => analytics(inner, config),
            Self::Document => document(inner, page, config),
        }
    }
}

/// Apply every provider to `page` and return the full HTML document.
pub fn wrap(page: PageElement, config: &SiteConfig) -> String {
    let body = page.body.clone();
    PROVIDERS
        .iter()
        .fold(body, |inner, provider| provider.apply(inner, &page, config))
}

fn comments(inner: String, page: &PageElement, config: &SiteConfig) -> String {
    let script = &config.integrations.disqus_script;
    if !page.comments || script.is_empty() {
        return inner;
    }
    format!(
        r#"{inner}<section class="comments"><div id="disqus_thread"></div><script async src="{}"></script></section>"#,
        escape(script)
    )
}

fn theme(inner: String, config: &SiteConfig) -> String {
    let mut html = String::with_capacity(inner.len() + STYLE.len() + 1024);

    html.push_str("<style>");
    html.push_str(STYLE);
    for (index, tag) in config.tags.iter().enumerate() {
        let _ = write!(
            html,
            ".tag-{}{{--tag-color:{}}}",
            tag.id,
            tag.color_or(index, &config.tag_colors)
        );
    }
    html.push_str("</style>");

    let pages = &config.pages;
    let _ = write!(
        html,
        r#"<header><a class="brand" href="{}">{}</a><nav>"#,
        escape(&route_url(normalize(&pages.home))),
        escape(&config.base.title)
    );
    for (name, prefix) in pages.entries() {
        let label = match name {
            "home" => "Home",
            "resume" => "Resume",
            "contact" => "Contact",
            "tags" => "Tags",
            _ => "Projects",
        };
        html.push_str(&link(&route_url(normalize(prefix)), label));
    }
    html.push_str("</nav></header>");

    let _ = write!(html, "<main>{inner}</main>");
    let _ = write!(
        html,
        "<footer>© {}</footer>",
        escape(&config.base.author)
    );
    html
}

fn analytics(inner: String, config: &SiteConfig) -> String {
    let id = config.integrations.google_analytics_id.trim();
    if id.is_empty() {
        return inner;
    }
    let id = escape(id);
    format!(
        r#"<script async src="https://www.googletagmanager.com/gtag/js?id={id}"></script><script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config','{id}');</script>{inner}"#
    )
}

fn document(inner: String, page: &PageElement, config: &SiteConfig) -> String {
    let base = &config.base;
    let title = match &page.title {
        Some(title) => format!("{} | {}", title, base.title),
        None => base.title.clone(),
    };
    let description = match page.description.is_empty() {
        true => &base.description,
        false => &page.description,
    };

    let mut html = String::with_capacity(inner.len() + 2048);
    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title><meta name="description" content="{}"><meta name="author" content="{}">"#,
        escape(&base.language),
        escape(&title),
        escape(description),
        escape(&base.author)
    );
    if let Some(url) = &base.url {
        let _ = write!(html, r#"<link rel="canonical" href="{}">"#, escape(url));
    }
    let _ = write!(
        html,
        "</head><body>{inner}<script>{}</script></body></html>",
        sw::register_script()
    );
    html
}
