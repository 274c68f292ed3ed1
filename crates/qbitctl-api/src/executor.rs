// Request executor
//
// Turns an endpoint descriptor plus call arguments into one HTTP round
// trip: URL resolution, parameter encoding, cookie attachment, status
// classification and shape-driven decoding. Every operation in the crate
// goes through `send`/`execute`.

use reqwest::StatusCode;
use reqwest::header::{COOKIE, HeaderValue};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::API_PREFIX;
use crate::client::Client;
use crate::endpoint::{Args, Encoding, Endpoint, Method};
use crate::error::Error;
use crate::payload::{Object, Payload};

impl Client {
    /// Execute any catalog operation and decode its reply by declared shape.
    ///
    /// A status other than 200 is a [`Error::RequestFailed`] carrying the
    /// status and body text; a 200 body that does not fit the shape is a
    /// [`Error::Decode`].
    ///
    /// Login and Logout are routed through [`Client::login`] and
    /// [`Client::logout`] so the stored credential follows the session.
    pub async fn execute(&self, endpoint: &Endpoint, args: &Args) -> Result<Payload, Error> {
        if let Some(result) = self.session_operation(endpoint, args).await {
            return result.map(|()| Payload::Empty);
        }

        let resp = self.send(endpoint, args).await?;
        let status = resp.status();
        trace!(operation = endpoint.name, status = status.as_u16(), "response");

        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::RequestFailed {
                operation: endpoint.name,
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        Payload::decode(endpoint, body)
    }

    /// Build and send the request for `endpoint`, returning the raw response.
    ///
    /// The stored cookie is attached when present; without one the request
    /// is still sent and the daemon decides (usually 403).
    pub(crate) async fn send(
        &self,
        endpoint: &Endpoint,
        args: &Args,
    ) -> Result<reqwest::Response, Error> {
        let resolved = endpoint.resolve(args)?;
        let url = self.endpoint_url(endpoint, &resolved.path_values)?;
        debug!(operation = endpoint.name, "{} {}", endpoint.method, url);

        let mut builder = match endpoint.method {
            Method::Get => self.http().get(url),
            Method::Post => self.http().post(url),
        };

        builder = match endpoint.encoding {
            Encoding::Query if resolved.pairs.is_empty() => builder,
            Encoding::Query => builder.query(&resolved.pairs),
            Encoding::Form => builder.form(&resolved.pairs),
            Encoding::Json => {
                let body = resolved
                    .body
                    .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                builder.json(&body)
            }
        };

        if let Some(cookie) = self.session.read().await.as_ref() {
            let mut value =
                HeaderValue::from_str(&cookie.header_value()).map_err(|e| Error::Construction {
                    operation: endpoint.name,
                    message: format!("session cookie is not a valid header value: {e}"),
                })?;
            value.set_sensitive(true);
            builder = builder.header(COOKIE, value);
        }

        Ok(builder.send().await?)
    }

    /// `{base}/api/v2{path}`, with `{name}` placeholders replaced by
    /// percent-encoded path values.
    fn endpoint_url(
        &self,
        endpoint: &Endpoint,
        path_values: &[(&'static str, String)],
    ) -> Result<Url, Error> {
        let construction = |message: String| Error::Construction {
            operation: endpoint.name,
            message,
        };

        let mut url = self.base_url().clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| construction("base URL cannot carry a path".into()))?;
            segments.pop_if_empty();

            let template = API_PREFIX.split('/').chain(endpoint.path.split('/'));
            for segment in template.filter(|s| !s.is_empty()) {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        let (_, value) = path_values
                            .iter()
                            .find(|(n, _)| *n == name)
                            .ok_or_else(|| construction(format!("no value for path '{{{name}}}'")))?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }
        Ok(url)
    }

    // ── Typed shape helpers ──────────────────────────────────────────

    pub(crate) async fn unit(&self, endpoint: &Endpoint, args: Args) -> Result<(), Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Empty => Ok(()),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }

    pub(crate) async fn text(&self, endpoint: &Endpoint, args: Args) -> Result<String, Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Text(text) => Ok(text),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }

    pub(crate) async fn int(&self, endpoint: &Endpoint, args: Args) -> Result<i64, Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Int(n) => Ok(n),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }

    pub(crate) async fn flag(&self, endpoint: &Endpoint, args: Args) -> Result<bool, Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Bool(b) => Ok(b),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }

    pub(crate) async fn object(&self, endpoint: &Endpoint, args: Args) -> Result<Object, Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Object(map) => Ok(map),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }

    pub(crate) async fn objects(
        &self,
        endpoint: &Endpoint,
        args: Args,
    ) -> Result<Vec<Object>, Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Objects(items) => Ok(items),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }

    pub(crate) async fn scalars(
        &self,
        endpoint: &Endpoint,
        args: Args,
    ) -> Result<Vec<Value>, Error> {
        match self.execute(endpoint, &args).await? {
            Payload::Scalars(items) => Ok(items),
            other => Err(shape_mismatch(endpoint, &other)),
        }
    }
}

fn shape_mismatch(endpoint: &Endpoint, payload: &Payload) -> Error {
    Error::Decode {
        operation: endpoint.name,
        message: format!(
            "declared shape {} decoded as {}",
            endpoint.shape,
            payload.shape()
        ),
        body: String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::endpoint::{ParamSpec, Shape};

    const NAME: ParamSpec = ParamSpec::path("name");
    static TEMPLATED: Endpoint = Endpoint::get("GetNamed", "/things/{name}/info", Shape::Object).params(&[NAME]);
    static PLAIN: Endpoint = Endpoint::get("GetApplicationVersion", "/app/version", Shape::Text);

    #[test]
    fn url_keeps_reverse_proxy_prefix() {
        let client = Client::new("https://host/qbt/").unwrap();
        let url = client.endpoint_url(&PLAIN, &[]).unwrap();
        assert_eq!(url.as_str(), "https://host/qbt/api/v2/app/version");
    }

    #[test]
    fn url_without_trailing_slash() {
        let client = Client::new("http://127.0.0.1:8080").unwrap();
        let url = client.endpoint_url(&PLAIN, &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/v2/app/version");
    }

    #[test]
    fn path_placeholders_are_percent_encoded() {
        let client = Client::new("http://localhost:8080").unwrap();
        let url = client
            .endpoint_url(&TEMPLATED, &[("name", "a b/c".to_owned())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v2/things/a%20b%2Fc/info"
        );
    }

    #[test]
    fn missing_path_value_is_a_construction_error() {
        let client = Client::new("http://localhost:8080").unwrap();
        let err = client.endpoint_url(&TEMPLATED, &[]).unwrap_err();
        assert!(err.is_construction());
    }
}
