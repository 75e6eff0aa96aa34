use url::form_urlencoded::byte_serialize;

/// One positional query parameter of a directory request.
///
/// The remote service takes a bare mode token (`WWWPeople`) as its first
/// argument, followed by ordinary `name=value` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryParam {
    Literal(String),
    Pair { name: String, value: String },
}

impl QueryParam {
    pub fn literal(token: impl Into<String>) -> Self {
        QueryParam::Literal(token.into())
    }

    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        QueryParam::Pair {
            name: name.into(),
            value: value.into(),
        }
    }

    /// URL-encoded form of this parameter.
    pub fn encode(&self) -> String {
        match self {
            QueryParam::Literal(token) => encode_component(token),
            QueryParam::Pair { name, value } => {
                format!("{}={}", encode_component(name), encode_component(value))
            }
        }
    }
}

/// RFC 3986 percent-encoding: only `A-Za-z0-9-._~` stay literal and a space
/// is `%20`, so URLs (and cache keys) match the legacy listings.
fn encode_component(s: &str) -> String {
    // Form encoding writes a space as `+` and disagrees on `*` and `~`
    byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Join encoded parameters in order, e.g. `WWWPeople&GrpName1=Faculty`.
pub fn encode_query(params: &[QueryParam]) -> String {
    params
        .iter()
        .map(QueryParam::encode)
        .collect::<Vec<_>>()
        .join("&")
}
