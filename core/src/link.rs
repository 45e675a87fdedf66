//! Back-linking request URLs found in responses to explorer deep links.

use crate::discovery::{ApiMethod, ApiService, HttpMethod};

/// Piece of a path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(String),
}

/// Split a path template such as `activities/{userId}/{scope}` into literal
/// and placeholder parts. An unclosed brace is kept as literal text.
pub fn parse_template(template: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut current_pos = 0;

    while current_pos < template.len() {
        let Some(start) = template[current_pos..].find('{') else {
            parts.push(TemplatePart::Literal(template[current_pos..].to_string()));
            break;
        };
        let abs_start = current_pos + start;
        let Some(end) = template[abs_start..].find('}') else {
            parts.push(TemplatePart::Literal(template[current_pos..].to_string()));
            break;
        };
        if abs_start > current_pos {
            parts.push(TemplatePart::Literal(
                template[current_pos..abs_start].to_string(),
            ));
        }
        let abs_end = abs_start + end;
        parts.push(TemplatePart::Placeholder(
            template[abs_start + 1..abs_end].to_string(),
        ));
        current_pos = abs_end + 1;
    }

    parts
}

/// Whether `path` matches the whole template, each placeholder standing for
/// one or more characters other than `/`.
pub fn matches_template(template: &str, path: &str) -> bool {
    match_parts(&parse_template(template), path)
}

fn match_parts(parts: &[TemplatePart], input: &str) -> bool {
    match parts.split_first() {
        None => input.is_empty(),
        Some((TemplatePart::Literal(lit), rest)) => input
            .strip_prefix(lit.as_str())
            .map(|remaining| match_parts(rest, remaining))
            .unwrap_or(false),
        Some((TemplatePart::Placeholder(_), rest)) => {
            let max = input.find('/').unwrap_or(input.len());
            (1..=max)
                .filter(|&end| input.is_char_boundary(end))
                .any(|end| match_parts(rest, &input[end..]))
        }
    }
}

/// Strings that look like URLs worth linking.
pub fn is_link(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://"))
        && !value.contains('\n')
        && !value.contains('\t')
}

/// Where a link-like string should point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Explorer deep-link token, e.g. `#_s=buzz&_v=v1&_m=activities.list`.
    Explorer(String),
    /// The URL itself.
    External(String),
}

impl LinkTarget {
    pub fn href(&self) -> &str {
        match self {
            LinkTarget::Explorer(href) | LinkTarget::External(href) => href,
        }
    }
}

/// Maps request URLs of one service back to its GET methods.
pub struct LinkResolver<'a> {
    service: &'a ApiService,
}

impl<'a> LinkResolver<'a> {
    pub fn new(service: &'a ApiService) -> Self {
        Self { service }
    }

    /// First GET method whose path template matches the URL, with its key.
    pub fn method_for_url(&self, url: &str) -> Option<(String, &'a ApiMethod)> {
        let prefix = self.service.api_link_prefix();
        let rest = url.strip_prefix(prefix.as_str())?;
        let path = split_query(rest).0;

        self.service
            .all_methods()
            .into_iter()
            .filter(|(_, method)| method.http_method == HttpMethod::Get)
            .find(|(_, method)| matches_template(&method.path, path))
    }

    /// Deep-link token for a URL already known to match `method`.
    pub fn explorer_link(&self, method_key: &str, method: &ApiMethod, url: &str) -> String {
        let mut token = format!(
            "#_s={}&_v={}&_m={}",
            self.service.name, self.service.version, method_key
        );

        let rest = url
            .strip_prefix(self.service.api_link_prefix().as_str())
            .unwrap_or(url);
        let (path, query) = split_query(rest);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            token.push('&');
            token.push_str(query);
        }

        let url_segments: Vec<&str> = path.split('/').collect();
        for (i, segment) in method.path.split('/').enumerate() {
            let binding = url_segments
                .get(i)
                .and_then(|value| segment_binding(segment, value));
            if let Some((param, value)) = binding {
                token.push_str(&format!("&{}={}", param, value));
            }
        }

        token
    }

    pub fn resolve(&self, url: &str) -> LinkTarget {
        match self.method_for_url(url) {
            Some((key, method)) => {
                tracing::trace!(url, method = %key, "Resolved explorer link");
                LinkTarget::Explorer(self.explorer_link(&key, method, url))
            }
            None => LinkTarget::External(url.to_string()),
        }
    }
}

/// Placeholder name of a template segment with the value it takes in the
/// matching URL segment, e.g. `{id}.json` against `abc.json` gives `id`/`abc`.
/// Segments with no placeholder, or more than one, bind nothing.
fn segment_binding<'u>(template: &str, value: &'u str) -> Option<(String, &'u str)> {
    let parts = parse_template(template);
    let mut placeholders = parts.iter().filter_map(|part| match part {
        TemplatePart::Placeholder(name) => Some(name),
        TemplatePart::Literal(_) => None,
    });
    let name = placeholders.next()?;
    if placeholders.next().is_some() {
        return None;
    }

    let mut value = value;
    let mut before = true;
    for part in &parts {
        match part {
            TemplatePart::Placeholder(_) => before = false,
            TemplatePart::Literal(lit) if before => value = value.strip_prefix(lit.as_str())?,
            TemplatePart::Literal(lit) => value = value.strip_suffix(lit.as_str())?,
        }
    }
    Some((name.clone(), value))
}

fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buzz() -> ApiService {
        let mut service = ApiService::new("buzz", "v1");
        service.base_path = "/buzz/v1/".to_string();
        let mut activities = crate::discovery::ApiResource::default();
        activities.methods.insert(
            "list".to_string(),
            ApiMethod::new("activities/{userId}/{scope}", HttpMethod::Get),
        );
        activities.methods.insert(
            "insert".to_string(),
            ApiMethod::new("activities/{userId}/@self", HttpMethod::Post),
        );
        activities.methods.insert(
            "get".to_string(),
            ApiMethod::new("activities/{userId}/@self/{postId}", HttpMethod::Get),
        );
        service.resources.insert("activities".to_string(), activities);
        service
    }

    #[test]
    fn test_parse_template() {
        assert_eq!(
            parse_template("a/{b}/c{d}"),
            vec![
                TemplatePart::Literal("a/".to_string()),
                TemplatePart::Placeholder("b".to_string()),
                TemplatePart::Literal("/c".to_string()),
                TemplatePart::Placeholder("d".to_string()),
            ]
        );
        assert_eq!(
            parse_template("a/{b"),
            vec![TemplatePart::Literal("a/{b".to_string())]
        );
    }

    #[test]
    fn test_matches_template() {
        assert!(matches_template("activities/{userId}/{scope}", "activities/1/@public"));
        assert!(!matches_template("activities/{userId}/{scope}", "activities/1/"));
        assert!(!matches_template("activities/{userId}/{scope}", "activities/1/a/b"));
        assert!(matches_template("files/{id}.json", "files/abc.def.json"));
        assert!(!matches_template("files/{id}", "files/a/b"));
    }

    #[test]
    fn test_is_link() {
        assert!(is_link("https://www.googleapis.com/buzz/v1/x"));
        assert!(is_link("http://example.com"));
        assert!(!is_link("ftp://example.com"));
        assert!(!is_link("https://a\nb"));
        assert!(!is_link("https://a\tb"));
        assert!(!is_link("see https://example.com"));
    }

    #[test]
    fn test_buzz_deep_link() {
        let service = buzz();
        let resolver = LinkResolver::new(&service);
        let target = resolver.resolve(
            "https://www.googleapis.com/buzz/v1/activities/123456789/@public?alt=json",
        );
        assert_eq!(
            target,
            LinkTarget::Explorer(
                "#_s=buzz&_v=v1&_m=activities.list&alt=json&userId=123456789&scope=@public"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_deep_link_without_query() {
        let service = buzz();
        let resolver = LinkResolver::new(&service);
        assert_eq!(
            resolver
                .resolve("https://www.googleapis.com/buzz/v1/activities/42/@self/99")
                .href(),
            "#_s=buzz&_v=v1&_m=activities.get&userId=42&postId=99"
        );
    }

    #[test]
    fn test_deep_link_strips_segment_literals() {
        let mut service = ApiService::new("files", "v1");
        service.base_path = "/files/v1/".to_string();
        service.methods.insert(
            "get".to_string(),
            ApiMethod::new("files/{id}.json", HttpMethod::Get),
        );
        service.methods.insert(
            "revision".to_string(),
            ApiMethod::new("files/{id}/rev-{n}", HttpMethod::Get),
        );
        let resolver = LinkResolver::new(&service);

        assert_eq!(
            resolver.resolve("https://www.googleapis.com/files/v1/files/abc.json"),
            LinkTarget::Explorer("#_s=files&_v=v1&_m=get&id=abc".to_string())
        );
        assert_eq!(
            resolver
                .resolve("https://www.googleapis.com/files/v1/files/abc/rev-7?fields=id")
                .href(),
            "#_s=files&_v=v1&_m=revision&fields=id&id=abc&n=7"
        );
    }

    #[test]
    fn test_segment_binding() {
        assert_eq!(segment_binding("{id}", "abc"), Some(("id".to_string(), "abc")));
        assert_eq!(
            segment_binding("v{major}.x", "v2.x"),
            Some(("major".to_string(), "2"))
        );
        assert_eq!(segment_binding("files", "files"), None);
        assert_eq!(segment_binding("{a}-{b}", "1-2"), None);
        assert_eq!(segment_binding("{id}.json", "abc.xml"), None);
    }

    #[test]
    fn test_first_get_match_wins() {
        let service = buzz();
        let resolver = LinkResolver::new(&service);

        // The POST insert template is literal here, but only GET methods count.
        let url = "https://www.googleapis.com/buzz/v1/activities/42/@self";
        let (key, _) = resolver.method_for_url(url).unwrap();
        assert_eq!(key, "activities.list");
    }

    #[test]
    fn test_unmatched_urls_are_external() {
        let service = buzz();
        let resolver = LinkResolver::new(&service);

        let url = "https://www.googleapis.com/buzz/v1/people/42";
        assert_eq!(resolver.resolve(url), LinkTarget::External(url.to_string()));

        let url = "https://example.com/buzz/v1/activities/1/@public";
        assert_eq!(resolver.resolve(url), LinkTarget::External(url.to_string()));
        assert!(resolver.method_for_url(url).is_none());
    }
}
