//! Site-wide artifacts generated from the route list.

pub mod sitemap;
