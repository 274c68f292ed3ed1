// Endpoint descriptors and call arguments
//
// A descriptor is static data: how one Web API operation is addressed,
// how its parameters travel on the wire, and what shape the reply has.
// `Args` carries the call-specific values; `Endpoint::resolve` checks them
// against the descriptor and produces the wire pairs the executor sends.

use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// Where the non-path parameters of a request are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// URL query string.
    Query,
    /// `application/x-www-form-urlencoded` body.
    Form,
    /// `application/json` body holding a single object.
    Json,
}

/// Separator the daemon expects between the items of a list parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `|` -- hashes, tracker URLs to remove, peers, plugin names.
    Pipe,
    /// `\n` -- URLs to add, tracker URLs to add, category names.
    Newline,
    /// `,` -- tag names.
    Comma,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pipe => "|",
            Self::Newline => "\n",
            Self::Comma => ",",
        }
    }

    /// Join items with this delimiter, preserving their order.
    pub fn join<S: AsRef<str>>(self, items: &[S]) -> String {
        let mut out = String::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(self.as_str());
            }
            out.push_str(item.as_ref());
        }
        out
    }
}

/// How a single parameter value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// One value, sent as text.
    Scalar,
    /// A list joined with the given delimiter into one field.
    List(Delimiter),
    /// A JSON document serialized into one text field.
    JsonText,
    /// Caller-chosen key/value pairs merged into the request as-is.
    Extra,
    /// The whole JSON object body (only valid with [`Encoding::Json`]).
    Body,
    /// Substituted into the `{name}` placeholder of the path template.
    Path,
}

/// One declared parameter of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Exact wire name expected by the daemon.
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Scalar,
            required: true,
        }
    }

    pub const fn list(name: &'static str, delimiter: Delimiter) -> Self {
        Self {
            name,
            kind: ParamKind::List(delimiter),
            required: true,
        }
    }

    pub const fn json_text(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::JsonText,
            required: true,
        }
    }

    pub const fn extra(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Extra,
            required: false,
        }
    }

    pub const fn body(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Body,
            required: true,
        }
    }

    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Path,
            required: true,
        }
    }

    /// Same parameter, but it may be left out of the call.
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

/// Declared shape of a successful response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Status-only acknowledgment.
    None,
    /// Bare, unquoted text (version strings, paths).
    Text,
    /// Bare JSON integer.
    Int,
    /// Bare `0` / `1`.
    Bool,
    /// Open-ended JSON object.
    Object,
    /// JSON array of objects.
    ObjectArray,
    /// JSON array of scalars.
    ScalarArray,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Text => "text",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Object => "object",
            Self::ObjectArray => "array-of-object",
            Self::ScalarArray => "array-of-scalar",
        })
    }
}

/// Static description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name, used in errors and logs.
    pub name: &'static str,
    pub method: Method,
    /// Path below the `/api/v2` prefix, e.g. `/torrents/pause`.
    pub path: &'static str,
    pub encoding: Encoding,
    pub params: &'static [ParamSpec],
    pub shape: Shape,
}

impl Endpoint {
    /// A GET endpoint: parameters in the query string.
    pub const fn get(name: &'static str, path: &'static str, shape: Shape) -> Self {
        Self {
            name,
            method: Method::Get,
            path,
            encoding: Encoding::Query,
            params: &[],
            shape,
        }
    }

    /// A POST endpoint: form-encoded parameters, status-only reply.
    pub const fn post(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: Method::Post,
            path,
            encoding: Encoding::Form,
            params: &[],
            shape: Shape::None,
        }
    }

    pub const fn params(self, params: &'static [ParamSpec]) -> Self {
        Self { params, ..self }
    }

    pub const fn returning(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }

    /// Switch the body encoding to a JSON object.
    pub const fn json(self) -> Self {
        Self {
            encoding: Encoding::Json,
            ..self
        }
    }

    fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    fn construction(&self, message: String) -> Error {
        Error::Construction {
            operation: self.name,
            message,
        }
    }

    /// Check `args` against this descriptor and encode them for the wire.
    ///
    /// Only the structure is checked (names, presence, value kinds); the
    /// values themselves are forwarded untouched for the daemon to judge.
    pub fn resolve(&self, args: &Args) -> Result<Resolved, Error> {
        if let Some((name, _)) = args.values.iter().find(|(n, _)| self.param(n).is_none()) {
            return Err(self.construction(format!("unknown parameter '{name}'")));
        }

        let mut resolved = Resolved::default();

        for spec in self.params {
            let Some(value) = args.get(spec.name) else {
                if spec.required {
                    return Err(self.construction(format!("missing parameter '{}'", spec.name)));
                }
                continue;
            };

            match (spec.kind, value) {
                (ParamKind::Scalar | ParamKind::List(_) | ParamKind::JsonText, ArgValue::Text(text)) => {
                    resolved.pairs.push((spec.name.to_owned(), text.clone()));
                }
                (ParamKind::List(delimiter), ArgValue::List(items)) => {
                    resolved
                        .pairs
                        .push((spec.name.to_owned(), delimiter.join(items.as_slice())));
                }
                (ParamKind::JsonText, ArgValue::Json(doc)) => {
                    resolved.pairs.push((spec.name.to_owned(), doc.to_string()));
                }
                (ParamKind::Extra, ArgValue::Pairs(pairs)) => {
                    for (key, val) in pairs {
                        if self.param(key).is_some() {
                            return Err(self.construction(format!(
                                "option '{key}' collides with a declared parameter"
                            )));
                        }
                        resolved.pairs.push((key.clone(), val.clone()));
                    }
                }
                (ParamKind::Body, ArgValue::Json(doc)) => {
                    if !doc.is_object() {
                        return Err(
                            self.construction(format!("'{}' must be a JSON object", spec.name))
                        );
                    }
                    resolved.body = Some(doc.clone());
                }
                (ParamKind::Path, ArgValue::Text(text)) => {
                    resolved.path_values.push((spec.name, text.clone()));
                }
                (kind, value) => {
                    return Err(self.construction(format!(
                        "parameter '{}' expects {kind:?}, got {}",
                        spec.name,
                        value.kind_name()
                    )));
                }
            }
        }

        if self.encoding == Encoding::Json && !resolved.pairs.is_empty() {
            return Err(self.construction("JSON endpoints take no field parameters".into()));
        }

        Ok(resolved)
    }
}

/// Arguments checked and encoded against an [`Endpoint`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    /// Values for `{name}` placeholders in the path.
    pub path_values: Vec<(&'static str, String)>,
    /// Query-string or form fields, in declaration order.
    pub pairs: Vec<(String, String)>,
    /// JSON object body, for [`Encoding::Json`] endpoints.
    pub body: Option<Value>,
}

/// A single call argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    List(Vec<String>),
    Json(Value),
    Pairs(Vec<(String, String)>),
}

impl ArgValue {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Json(_) => "json",
            Self::Pairs(_) => "key/value pairs",
        }
    }
}

/// Call-specific arguments, keyed by parameter wire name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<(String, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any earlier value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        let name = name.into();
        self.values.retain(|(n, _)| *n != name);
        self.values.push((name, value));
        self
    }

    pub fn text(self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, ArgValue::Text(value.to_string()))
    }

    /// Set a parameter only when a value is present.
    pub fn opt_text(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn list<I, S>(self, name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let items = items.into_iter().map(|s| s.to_string()).collect();
        self.set(name, ArgValue::List(items))
    }

    pub fn json(self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, ArgValue::Json(value))
    }

    pub fn pairs<I, K, V>(self, name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.set(name, ArgValue::Pairs(pairs))
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const HASHES: ParamSpec = ParamSpec::list("hashes", Delimiter::Pipe);
    const TAGS: ParamSpec = ParamSpec::list("tags", Delimiter::Comma);
    const URLS: ParamSpec = ParamSpec::list("urls", Delimiter::Newline);
    const OPTIONS: ParamSpec = ParamSpec::extra("options");
    const LIMIT: ParamSpec = ParamSpec::scalar("limit");
    const CATEGORY: ParamSpec = ParamSpec::scalar("category").optional();
    const BODY: ParamSpec = ParamSpec::body("json");
    const NAME: ParamSpec = ParamSpec::path("name");

    static TAGGED: Endpoint = Endpoint::post("AddTorrentTags", "/torrents/addTags").params(&[HASHES, TAGS]);
    static ADD: Endpoint = Endpoint::post("AddNewTorrent", "/torrents/add").params(&[URLS, OPTIONS]);
    static LIMITED: Endpoint =
        Endpoint::get("GetTorrentList", "/torrents/info", Shape::ObjectArray).params(&[LIMIT, CATEGORY]);
    static PREFS: Endpoint = Endpoint::post("SetApplicationPreferences", "/app/setPreferences")
        .params(&[BODY])
        .json();
    static TEMPLATED: Endpoint = Endpoint::get("GetNamed", "/things/{name}", Shape::Object).params(&[NAME]);

    #[test]
    fn delimiters_are_per_parameter() {
        let args = Args::new()
            .list("hashes", ["h1", "h2"])
            .list("tags", ["a", "b"]);
        let resolved = TAGGED.resolve(&args).unwrap();
        assert_eq!(
            resolved.pairs,
            vec![
                ("hashes".to_owned(), "h1|h2".to_owned()),
                ("tags".to_owned(), "a,b".to_owned()),
            ]
        );
    }

    #[test]
    fn newline_lists_and_extra_options() {
        let args = Args::new()
            .list("urls", ["magnet:?xt=1", "magnet:?xt=2"])
            .pairs("options", [("savepath", "/data"), ("paused", "true")]);
        let resolved = ADD.resolve(&args).unwrap();
        assert_eq!(resolved.pairs[0].1, "magnet:?xt=1\nmagnet:?xt=2");
        assert_eq!(resolved.pairs[1], ("savepath".to_owned(), "/data".to_owned()));
        assert_eq!(resolved.pairs[2], ("paused".to_owned(), "true".to_owned()));
    }

    #[test]
    fn extra_option_cannot_shadow_declared_parameter() {
        let args = Args::new()
            .list("urls", ["u"])
            .pairs("options", [("urls", "other")]);
        let err = ADD.resolve(&args).unwrap_err();
        assert!(matches!(err, Error::Construction { .. }));
    }

    #[test]
    fn missing_required_parameter_is_rejected() {
        let err = LIMITED.resolve(&Args::new()).unwrap_err();
        assert!(err.to_string().contains("missing parameter 'limit'"));
    }

    #[test]
    fn optional_parameter_may_be_omitted() {
        let resolved = LIMITED.resolve(&Args::new().text("limit", 10)).unwrap();
        assert_eq!(resolved.pairs, vec![("limit".to_owned(), "10".to_owned())]);
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let args = Args::new().text("limit", 1).text("bogus", 2);
        let err = LIMITED.resolve(&args).unwrap_err();
        assert!(err.to_string().contains("unknown parameter 'bogus'"));
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let args = Args::new().list("limit", ["1", "2"]);
        assert!(LIMITED.resolve(&args).is_err());
    }

    #[test]
    fn json_body_must_be_an_object() {
        let ok = PREFS
            .resolve(&Args::new().json("json", json!({ "dl_limit": 1 })))
            .unwrap();
        assert_eq!(ok.body, Some(json!({ "dl_limit": 1 })));
        assert!(ok.pairs.is_empty());

        let err = PREFS.resolve(&Args::new().json("json", json!([1]))).unwrap_err();
        assert!(err.is_construction());
    }

    #[test]
    fn path_values_are_collected() {
        let resolved = TEMPLATED.resolve(&Args::new().text("name", "a b")).unwrap();
        assert_eq!(resolved.path_values, vec![("name", "a b".to_owned())]);
        assert!(resolved.pairs.is_empty());
    }

    #[test]
    fn later_value_replaces_earlier_one() {
        let args = Args::new().text("limit", 1).text("limit", 2);
        assert_eq!(args.get("limit"), Some(&ArgValue::Text("2".into())));
    }

    #[test]
    fn join_preserves_order() {
        assert_eq!(Delimiter::Pipe.join(&["b", "a", "b"]), "b|a|b");
        assert_eq!(Delimiter::Comma.join::<&str>(&[]), "");
    }
}
