/// Strips scripts, event handlers and unsafe URLs from admin-authored markup.
/// Used on every write and at every site that emits the description as HTML.
pub fn sanitize_description(html: &str) -> String {
    ammonia::clean(html)
}
