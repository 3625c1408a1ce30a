//! Page templates.
//!
//! Each template binds config or repository data into the inner HTML of a
//! page. Document structure, navigation and scripts are added later by the
//! providers in `wrap.rs`.

use std::fmt::Write as _;

use super::{PageElement, Template};
use crate::{
    config::{Position, SiteConfig, pages::normalize},
    data::{RepoEntry, RepoStore, ResolveError},
    utils::{
        html::{escape, link},
        slug::{join_route, route_url},
    },
};

/// Render the inner page for `template`.
///
/// Fails only when a bound record is missing from its source.
pub fn render(
    template: &Template,
    config: &SiteConfig,
    repos: &RepoStore,
) -> Result<PageElement, ResolveError> {
    let page = match template {
        Template::Home => home(config),
        Template::Resume => resume(config),
        Template::Contact => contact(config),
        Template::TagIndex => tag_index(config),
        Template::Tag { id } => tag(config, id)?,
        Template::ProjectIndex => project_index(repos.list()),
        Template::Project { id } => project(repos.get(id)?),
        Template::NotFound => not_found(config),
    };
    Ok(page)
}

// ============================================================================
// Profile Pages
// ============================================================================

fn home(config: &SiteConfig) -> PageElement {
    let base = &config.base;
    let mut body = String::new();

    body.push_str(r#"<section class="profile">"#);
    let _ = write!(
        body,
        r#"<img class="avatar" src="{}" alt="{}">"#,
        escape(&asset_url(&base.avatar)),
        escape(&base.author)
    );
    let _ = write!(body, "<h1>{}</h1>", escape(&base.author));
    if let Some(alt) = &base.author_alternative {
        let _ = write!(body, r#"<p class="alt-name">{}</p>"#, escape(alt));
    }
    if !base.professions.is_empty() {
        let professions: Vec<String> = base.professions.iter().map(|p| escape(p)).collect();
        let _ = write!(body, r#"<p class="professions">{}</p>"#, professions.join(" · "));
    }
    body.push_str(&social_links(config));
    body.push_str(&contact_facts(config));
    body.push_str("</section>");

    if !base.introduction.is_empty() {
        body.push_str(r#"<section class="introduction"><h2>About Me</h2>"#);
        for paragraph in &base.introduction {
            // Introduction is authored HTML
            let _ = write!(body, "<p>{paragraph}</p>");
        }
        body.push_str("</section>");
    }

    if !config.interests.is_empty() {
        body.push_str(r#"<section class="interests"><h2>Interests</h2><ul>"#);
        for interest in &config.interests {
            let _ = write!(
                body,
                r#"<li data-icon="{}">{}</li>"#,
                escape(&interest.icon),
                escape(&interest.title)
            );
        }
        body.push_str("</ul></section>");
    }

    PageElement {
        title: None,
        description: base.description.clone(),
        body,
        comments: false,
    }
}

/// Site-relative assets are rooted at `/`; absolute URLs pass through.
fn asset_url(src: &str) -> String {
    if src.contains("://") || src.starts_with("//") || src.starts_with("data:") {
        src.to_string()
    } else {
        format!("/{}", src.trim_start_matches('/'))
    }
}

fn social_links(config: &SiteConfig) -> String {
    if config.social.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<ul class="social">"#);
    for social in &config.social {
        let _ = write!(
            html,
            r#"<li data-icon="{} {}">{}</li>"#,
            escape(&social.icon[0]),
            escape(&social.icon[1]),
            link(&social.url, social.label())
        );
    }
    html.push_str("</ul>");
    html
}

fn contact_facts(config: &SiteConfig) -> String {
    let base = &config.base;
    let facts = [
        ("Birthday", base.birthday.as_deref()),
        ("Location", base.location.as_deref()),
        ("Email", base.email.as_deref()),
    ];
    if facts.iter().all(|(_, value)| value.is_none()) {
        return String::new();
    }

    let mut html = String::from(r#"<dl class="facts">"#);
    for (label, value) in facts {
        let Some(value) = value else { continue };
        let value = match label {
            "Email" => link(&format!("mailto:{value}"), value),
            _ => escape(value),
        };
        let _ = write!(html, "<dt>{label}</dt><dd>{value}</dd>");
    }
    html.push_str("</dl>");
    html
}

fn resume(config: &SiteConfig) -> PageElement {
    let mut body = String::from(r#"<h1 class="title">Resume</h1>"#);

    if !config.education.is_empty() {
        body.push_str(r#"<section class="education"><h2>Education</h2><ul class="timeline">"#);
        for edu in &config.education {
            let _ = write!(
                body,
                r#"<li data-icon="{}"><span class="date">{}</span><h3>{}</h3><p>{}</p></li>"#,
                escape(&edu.icon),
                escape(&edu.date),
                escape(&edu.title),
                escape(&edu.location)
            );
        }
        body.push_str("</ul></section>");
    }

    if !config.experience.is_empty() {
        body.push_str(r#"<section class="experience"><h2>Experience</h2><div class="columns">"#);
        for position in [Position::Left, Position::Right] {
            let _ = write!(body, r#"<div class="column {}">"#, position.as_str());
            for group in config.experience.iter().filter(|g| g.position == position) {
                let _ = write!(body, "<h3>{}</h3><ul class=\"timeline\">", escape(&group.title));
                for item in &group.data {
                    let _ = write!(
                        body,
                        r#"<li><span class="date">{}</span><h4>{}</h4><p class="location">{}</p><p>{}</p></li>"#,
                        escape(&item.date),
                        escape(&item.title),
                        escape(&item.location),
                        escape(&item.description)
                    );
                }
                body.push_str("</ul>");
            }
            body.push_str("</div>");
        }
        body.push_str("</div></section>");
    }

    if !config.awards.is_empty() {
        body.push_str(r#"<section class="awards"><h2>Awards</h2><ul>"#);
        for award in &config.awards {
            let _ = write!(
                body,
                r#"<li><span class="date">{}</span> {}</li>"#,
                escape(&award.date),
                escape(&award.title)
            );
        }
        body.push_str("</ul></section>");
    }

    PageElement {
        title: Some("Resume".into()),
        description: format!("Resume of {}", config.base.author),
        body,
        comments: false,
    }
}

fn contact(config: &SiteConfig) -> PageElement {
    let mut body = String::from(r#"<h1 class="title">Contact</h1>"#);
    if let Some(email) = &config.base.email {
        let _ = write!(
            body,
            "<p>Reach me at {} or through the form below.</p>",
            link(&format!("mailto:{email}"), email)
        );
    }
    let _ = write!(
        body,
        r#"<form class="contact" action="{}" method="POST"><label>Name<input type="text" name="name" required></label><label>Email<input type="email" name="email" required></label><label>Message<textarea name="message" rows="6" required></textarea></label><button type="submit">Send</button></form>"#,
        escape(&config.integrations.contact_form_url)
    );

    PageElement {
        title: Some("Contact".into()),
        description: format!("Get in touch with {}", config.base.author),
        body,
        comments: false,
    }
}

// ============================================================================
// Tags
// ============================================================================

fn tag_index(config: &SiteConfig) -> PageElement {
    let mut body = String::from(r#"<h1 class="title">Tags</h1>"#);
    if config.tags.is_empty() {
        body.push_str(r#"<p class="empty">No tags yet.</p>"#);
    } else {
        body.push_str(r#"<ul class="tags">"#);
        for tag in &config.tags {
            let href = route_url(&join_route(&[config.pages.tags.as_str(), tag.id.as_str()]));
            let _ = write!(
                body,
                r#"<li><a class="tag tag-{}" href="{}">{}</a> {}</li>"#,
                escape(&tag.id),
                escape(&href),
                escape(&tag.name),
                escape(&tag.description)
            );
        }
        body.push_str("</ul>");
    }

    PageElement {
        title: Some("Tags".into()),
        description: "All tags".into(),
        body,
        comments: false,
    }
}

fn tag(config: &SiteConfig, id: &str) -> Result<PageElement, ResolveError> {
    let tag = config
        .tags
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ResolveError::NotFound { id: id.to_string() })?;

    let mut body = format!(
        r#"<h1 class="title"><span class="tag tag-{}">{}</span></h1>"#,
        escape(&tag.id),
        escape(&tag.name)
    );
    if !tag.description.is_empty() {
        let _ = write!(body, "<p>{}</p>", escape(&tag.description));
    }
    let _ = write!(
        body,
        "<p>{}</p>",
        link(&route_url(normalize(&config.pages.tags)), "All tags")
    );

    Ok(PageElement {
        title: Some(tag.name.clone()),
        description: tag.description.clone(),
        body,
        comments: false,
    })
}

// ============================================================================
// Projects
// ============================================================================

fn project_index(repos: &[RepoEntry]) -> PageElement {
    let mut body = String::from(r#"<h1 class="title">Projects</h1>"#);
    if repos.is_empty() {
        body.push_str(r#"<p class="empty">No projects yet.</p>"#);
    }
    for repo in repos {
        let _ = write!(
            body,
            r#"<article class="project"><h3>{}</h3><div class="description">{}</div></article>"#,
            link(&route_url(&repo.path), &repo.name),
            escape(repo.description.as_deref().unwrap_or_default())
        );
    }

    PageElement {
        title: Some("Projects".into()),
        description: "Open-source projects from GitHub.".into(),
        body,
        comments: false,
    }
}

fn project(repo: &RepoEntry) -> PageElement {
    let description = repo.description.clone().unwrap_or_default();
    let mut body = format!(r#"<h1 class="title">{}</h1>"#, escape(&repo.name));
    let _ = write!(body, r#"<p class="description">{}</p>"#, escape(&description));
    let _ = write!(
        body,
        "<ul><li>Stars: {}</li><li>Language: {}</li><li>{}</li></ul>",
        repo.stargazers_count,
        escape(repo.language.as_deref().unwrap_or("Unknown")),
        link(&repo.html_url, "GitHub")
    );

    PageElement {
        title: Some(repo.name.clone()),
        description,
        body,
        comments: true,
    }
}

fn not_found(config: &SiteConfig) -> PageElement {
    PageElement {
        title: Some("Not Found".into()),
        description: String::new(),
        body: format!(
            r#"<h1 class="title">404</h1><p>This page does not exist. {}</p>"#,
            link(&route_url(normalize(&config.pages.home)), "Go home")
        ),
        comments: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Award, Education, ExperienceGroup, ExperienceItem, SocialLink, Tag};

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Liam Cawley".into();
        config.base.author = "Liam Cawley".into();
        config.base.introduction = vec![r#"I study at <a href="https://umich.edu">UMich</a>."#.into()];
        config.base.professions = vec!["Student".into(), "Engineer".into()];
        config.base.email = Some("me@example.com".into());
        config.social = vec![SocialLink {
            url: "https://github.com/cawley".into(),
            icon: ["fab".into(), "github".into()],
        }];
        config.education = vec![Education {
            date: "2021 - Present".into(),
            icon: "university".into(),
            title: "B.S.E.".into(),
            location: "University of Michigan".into(),
        }];
        config.experience = vec![
            ExperienceGroup {
                title: "Work".into(),
                position: Position::Left,
                data: vec![ExperienceItem {
                    date: "2024".into(),
                    title: "Intern".into(),
                    location: "Little Frankie's".into(),
                    description: "Cooked.".into(),
                }],
            },
            ExperienceGroup {
                title: "Teaching".into(),
                position: Position::Right,
                data: vec![],
            },
        ];
        config.awards = vec![Award {
            date: "2020".into(),
            title: "USACO Silver".into(),
        }];
        config.tags = vec![Tag {
            id: "rust".into(),
            name: "Rust".into(),
            description: "Systems <language>".into(),
            color: None,
        }];
        config
    }

    fn repos() -> RepoStore {
        let raw = serde_json::from_str(
            r#"[{"id": 7, "name": "folio", "description": "Site & generator",
                 "html_url": "https://github.com/x/folio", "stargazers_count": 3, "language": "Rust"}]"#,
        )
        .unwrap();
        RepoStore::new(raw, "projects").unwrap()
    }

    #[test]
    fn test_home_binds_identity() {
        let page = render(&Template::Home, &config(), &repos()).unwrap();

        assert_eq!(page.title, None);
        assert!(page.body.contains("<h1>Liam Cawley</h1>"));
        assert!(page.body.contains("Student · Engineer"));
        assert!(page.body.contains(r#"<a href="https://umich.edu">UMich</a>"#));
        assert!(page.body.contains(r#"href="mailto:me@example.com""#));
        assert!(page.body.contains(">github</a>"));
    }

    #[test]
    fn test_avatar_url() {
        let mut config = config();
        let page = render(&Template::Home, &config, &repos()).unwrap();
        assert!(page.body.contains(r#"src="/avatar.png""#));

        config.base.avatar = "https://avatars.githubusercontent.com/u/1".into();
        let page = render(&Template::Home, &config, &repos()).unwrap();
        assert!(page.body.contains(r#"src="https://avatars.githubusercontent.com/u/1""#));

        assert_eq!(asset_url("/img/me.png"), "/img/me.png");
        assert_eq!(asset_url("//cdn.example.com/me.png"), "//cdn.example.com/me.png");
    }

    #[test]
    fn test_resume_columns_and_escaping() {
        let page = render(&Template::Resume, &config(), &repos()).unwrap();

        let left = page.body.find("column left").unwrap();
        let right = page.body.find("column right").unwrap();
        let work = page.body.find("<h3>Work</h3>").unwrap();
        let teaching = page.body.find("<h3>Teaching</h3>").unwrap();
        assert!(left < work && work < right && right < teaching);
        assert!(page.body.contains("Little Frankie&#39;s"));
        assert!(page.body.contains("USACO Silver"));
    }

    #[test]
    fn test_contact_uses_form_endpoint() {
        let mut config = config();
        config.integrations.contact_form_url = "https://forms.example.com/abc".into();
        let page = render(&Template::Contact, &config, &repos()).unwrap();

        assert!(page.body.contains(r#"action="https://forms.example.com/abc""#));
    }

    #[test]
    fn test_tag_pages() {
        let index = render(&Template::TagIndex, &config(), &repos()).unwrap();
        assert!(index.body.contains(r#"href="/tags/rust/""#));

        let tag = render(&Template::Tag { id: "rust".into() }, &config(), &repos()).unwrap();
        assert_eq!(tag.title.as_deref(), Some("Rust"));
        assert!(tag.body.contains("Systems &lt;language&gt;"));
    }

    #[test]
    fn test_unknown_tag_not_found() {
        let result = render(&Template::Tag { id: "go".into() }, &config(), &repos());
        assert!(matches!(result, Err(ResolveError::NotFound { .. })));
    }

    #[test]
    fn test_project_index_links_detail_pages() {
        let page = render(&Template::ProjectIndex, &config(), &repos()).unwrap();

        assert!(page.body.contains(r#"<a href="/projects/folio/">folio</a>"#));
        assert!(page.body.contains("Site &amp; generator"));
    }

    #[test]
    fn test_project_index_empty_state() {
        let page = render(&Template::ProjectIndex, &config(), &RepoStore::default()).unwrap();
        assert!(page.body.contains("No projects yet."));
    }

    #[test]
    fn test_project_detail() {
        let page = render(&Template::Project { id: "7".into() }, &config(), &repos()).unwrap();

        assert!(page.comments);
        assert!(page.body.contains("Stars: 3"));
        assert!(page.body.contains("Language: Rust"));
        assert!(page.body.contains(r#"href="https://github.com/x/folio""#));
    }

    #[test]
    fn test_project_detail_not_found() {
        let result = render(
            &Template::Project {
                id: "nonexistent-id".into(),
            },
            &config(),
            &RepoStore::default(),
        );
        assert!(matches!(result, Err(ResolveError::NotFound { id }) if id == "nonexistent-id"));
    }
}
