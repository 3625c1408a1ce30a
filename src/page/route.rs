//! Route planning: the full list of pages one build emits.

use std::collections::HashMap;

use super::{Route, Template};
use crate::{
    config::{SiteConfig, pages::normalize},
    data::{RepoStore, ResolveError},
    utils::slug::join_route,
};

/// Plan every route for the site, in emission order.
///
/// Project detail routes come one-to-one from `repos`, tag routes one-to-one
/// from `[[tags]]`. Fails when two routes resolve to the same path, e.g. a
/// `[pages]` prefix nested onto a tag or project page.
pub fn plan_routes(config: &SiteConfig, repos: &RepoStore) -> Result<Vec<Route>, ResolveError> {
    let pages = &config.pages;
    let mut routes = Vec::with_capacity(6 + config.tags.len() + repos.len());

    routes.push(Route::new(normalize(&pages.home), Template::Home));
    routes.push(Route::new(normalize(&pages.resume), Template::Resume));
    routes.push(Route::new(normalize(&pages.contact), Template::Contact));

    routes.push(Route::new(normalize(&pages.tags), Template::TagIndex));
    routes.extend(config.tags.iter().map(|tag| {
        Route::new(
            join_route(&[pages.tags.as_str(), tag.id.as_str()]),
            Template::Tag { id: tag.id.clone() },
        )
    }));

    routes.push(Route::new(normalize(&pages.projects), Template::ProjectIndex));
    routes.extend(repos.list().iter().map(|entry| {
        Route::new(
            entry.path.clone(),
            Template::Project {
                id: entry.id.clone(),
            },
        )
    }));

    routes.push(Route::new("404", Template::NotFound));
    check_unique(&routes)?;
    Ok(routes)
}

/// Every route must own its output file.
fn check_unique(routes: &[Route]) -> Result<(), ResolveError> {
    let mut taken: HashMap<&str, &Route> = HashMap::with_capacity(routes.len());
    for route in routes.iter().filter(|r| r.template != Template::NotFound) {
        if let Some(first) = taken.insert(&route.path, route) {
            return Err(ResolveError::DuplicatePath {
                path: route.path.clone(),
                first: describe(first),
                second: describe(route),
            });
        }
    }
    Ok(())
}

fn describe(route: &Route) -> String {
    match &route.template {
        Template::Tag { id } | Template::Project { id } => {
            format!("{} `{id}`", route.template.name())
        }
        template => template.name().to_string(),
    }
}
