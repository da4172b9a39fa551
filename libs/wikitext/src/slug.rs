use regex::Regex;

pub const ROUTE_PREFIX: &str = "/wiki/";

lazy_static::lazy_static! {
    static ref WHITESPACE_RGX: Regex = Regex::new(r"\s+").unwrap();
}

/// Turns a page title into its url title: every run of whitespace becomes a single `_`.
/// Case and every other character are kept as they are.
pub fn derive_slug(title: &str) -> String {
    WHITESPACE_RGX.replace_all(title, "_").into_owned()
}

pub fn route_for(url_title: &str) -> String {
    let mut route = String::with_capacity(ROUTE_PREFIX.len() + url_title.len());
    route.push_str(ROUTE_PREFIX);
    route.push_str(url_title);
    route
}
