//! Default transport: HTTP/1.1 over tokio TCP with rustls for `https`
//!
//! Each `invoke` runs the exchange to completion on a private current-thread
//! runtime, so the transport must not be called from inside an async
//! context.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;

use super::{Handle, InfoKey, InfoValue, ResponseBody, Transport, TransportReply, codes};
use crate::options::{OptionKey, OptionSet, OptionValue};
use crate::query::{EncodingDialect, QueryEncoder};

/// Failed exchange, reported to the executor as a transport error code
#[derive(Debug)]
struct Failure {
    code: i32,
    message: String,
}

impl Failure {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Completed exchange
struct Exchange {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

/// Blocking HTTP/1.1 transport built on `hyper`
#[derive(Debug, Default)]
pub struct HyperTransport {
    tls: OnceLock<Arc<ClientConfig>>,
}

impl HyperTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn perform(&self, options: &OptionSet) -> Result<Exchange, Failure> {
        let raw_url = options
            .text(&OptionKey::URL)
            .ok_or_else(|| Failure::new(codes::URL_MALFORMAT, "no URL set"))?;
        let url = Url::parse(raw_url).map_err(|e| {
            Failure::new(codes::URL_MALFORMAT, format!("malformed URL '{raw_url}': {e}"))
        })?;

        let secure = match url.scheme() {
            "http" => false,
            "https" => true,
            other => {
                return Err(Failure::new(
                    codes::UNSUPPORTED_PROTOCOL,
                    format!("protocol \"{other}\" not supported"),
                ));
            }
        };

        let host = url
            .host_str()
            .ok_or_else(|| Failure::new(codes::URL_MALFORMAT, format!("no host in URL '{raw_url}'")))?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();
        let port = url.port_or_known_default().unwrap_or(if secure { 443 } else { 80 });

        let request = build_request(&url, options)?;
        let connect_timeout = options.int(&OptionKey::CONNECT_TIMEOUT).and_then(millis);
        let total_timeout = options.int(&OptionKey::TIMEOUT).and_then(millis);

        if secure && !options.get(&OptionKey::SSL_VERIFY_PEER).and_then(OptionValue::as_bool).unwrap_or(true) {
            tracing::warn!(host = %host, "peer verification cannot be disabled; verifying against webpki roots");
        }

        let exchange = async {
            let tcp = with_timeout(connect_timeout, connect(&host, port)).await??;
            if secure {
                let tls = self.tls_connect(&host, tcp).await?;
                send(TokioIo::new(tls), request).await
            } else {
                send(TokioIo::new(tcp), request).await
            }
        };

        with_timeout(total_timeout, exchange).await?
    }

    async fn tls_connect(
        &self,
        host: &str,
        tcp: TcpStream,
    ) -> Result<tokio_rustls::client::TlsStream<TcpStream>, Failure> {
        let config = self.tls_config()?;
        let server_name = ServerName::try_from(host.to_string()).map_err(|e| {
            Failure::new(codes::SSL_CONNECT_ERROR, format!("invalid server name '{host}': {e}"))
        })?;

        TlsConnector::from(config)
            .connect(server_name, tcp)
            .await
            .map_err(|e| Failure::new(codes::SSL_CONNECT_ERROR, format!("TLS handshake failed: {e}")))
    }

    fn tls_config(&self) -> Result<Arc<ClientConfig>, Failure> {
        if let Some(config) = self.tls.get() {
            return Ok(config.clone());
        }

        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| Failure::new(codes::SSL_CONNECT_ERROR, format!("TLS setup failed: {e}")))?
        .with_root_certificates(roots)
        .with_no_client_auth();

        Ok(self.tls.get_or_init(|| Arc::new(config)).clone())
    }
}

impl Transport for HyperTransport {
    fn invoke(&self, handle: &mut Handle) -> TransportReply {
        let started = Instant::now();
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                return TransportReply::failure(
                    codes::FAILED_INIT,
                    format!("failed to start I/O runtime: {e}"),
                );
            }
        };

        let options = handle.options().clone();
        let outcome = runtime.block_on(self.perform(&options));
        handle.record(InfoKey::TotalTime, InfoValue::Duration(started.elapsed()));

        let exchange = match outcome {
            Ok(exchange) => exchange,
            Err(failure) => {
                tracing::debug!(code = failure.code, message = %failure.message, "exchange failed");
                return TransportReply::failure(failure.code, failure.message);
            }
        };

        handle.record(
            InfoKey::ResponseCode,
            InfoValue::Int(i64::from(exchange.status.as_u16())),
        );
        if let Some(url) = options.text(&OptionKey::URL) {
            handle.record(InfoKey::EffectiveUrl, InfoValue::Text(url.to_string()));
        }
        if let Some(content_type) = exchange
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            handle.record(InfoKey::ContentType, InfoValue::Text(content_type.to_string()));
        }
        handle.record(
            InfoKey::SizeDownload,
            InfoValue::Int(i64::try_from(exchange.body.len()).unwrap_or(i64::MAX)),
        );

        if options.flag(&OptionKey::RETURN_TRANSFER) {
            let text = String::from_utf8_lossy(&exchange.body).into_owned();
            return TransportReply::success(ResponseBody::Buffered(text));
        }

        let mut stdout = std::io::stdout().lock();
        match stdout.write_all(&exchange.body).and_then(|()| stdout.flush()) {
            Ok(()) => TransportReply::success(ResponseBody::Streamed),
            Err(e) => TransportReply::failure(codes::WRITE_ERROR, format!("failed writing body: {e}")),
        }
    }

    fn name(&self) -> &'static str {
        "hyper-http1"
    }
}

fn millis(value: i64) -> Option<Duration> {
    u64::try_from(value).ok().filter(|ms| *ms > 0).map(Duration::from_millis)
}

async fn with_timeout<F, T>(limit: Option<Duration>, future: F) -> Result<T, Failure>
where
    F: Future<Output = T>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| {
            Failure::new(
                codes::OPERATION_TIMEDOUT,
                format!("operation timed out after {} milliseconds", limit.as_millis()),
            )
        }),
        None => Ok(future.await),
    }
}

async fn connect(host: &str, port: u16) -> Result<TcpStream, Failure> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| Failure::new(codes::COULDNT_RESOLVE_HOST, format!("could not resolve host '{host}': {e}")))?
        .collect();

    if addrs.is_empty() {
        return Err(Failure::new(
            codes::COULDNT_RESOLVE_HOST,
            format!("could not resolve host '{host}'"),
        ));
    }

    let stream = TcpStream::connect(&addrs[..])
        .await
        .map_err(|e| Failure::new(codes::COULDNT_CONNECT, format!("failed to connect to {host} port {port}: {e}")))?;
    // Small request/response exchanges; don't wait on Nagle
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("failed to set TCP_NODELAY on {host}:{port}: {e}");
    }
    Ok(stream)
}

async fn send<T>(io: TokioIo<T>, request: Request<Full<Bytes>>) -> Result<Exchange, Failure>
where
    T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| Failure::new(codes::SEND_ERROR, format!("HTTP handshake failed: {e}")))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!("connection closed with error: {e}");
        }
    });

    let response = sender.send_request(request).await.map_err(|e| {
        let code = if e.is_incomplete_message() {
            codes::GOT_NOTHING
        } else {
            codes::SEND_ERROR
        };
        Failure::new(code, format!("request failed: {e}"))
    })?;

    let (parts, body) = response.into_parts();
    let body = body
        .collect()
        .await
        .map_err(|e| Failure::new(codes::RECV_ERROR, format!("failed reading body: {e}")))?
        .to_bytes();

    Ok(Exchange {
        status: parts.status,
        headers: parts.headers,
        body,
    })
}

fn build_request(url: &Url, options: &OptionSet) -> Result<Request<Full<Bytes>>, Failure> {
    let send_body = options.flag(&OptionKey::POST);
    let method_name = options
        .text(&OptionKey::METHOD)
        .unwrap_or(if send_body { "POST" } else { "GET" });
    let method = Method::from_bytes(method_name.as_bytes()).map_err(|e| {
        Failure::new(codes::BAD_FUNCTION_ARGUMENT, format!("invalid method '{method_name}': {e}"))
    })?;

    let target = match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    };
    let authority = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    let mut builder = Request::builder()
        .method(method)
        .uri(target)
        .header(header::HOST, authority);

    let mut has_user_agent = false;
    let mut has_content_type = false;
    for line in options.list(&OptionKey::HTTP_HEADER).unwrap_or_default() {
        let Some((name, value)) = line.split_once(':') else {
            tracing::warn!(line = %line, "skipping header line without ':'");
            continue;
        };
        let name = name.trim();
        has_user_agent |= name.eq_ignore_ascii_case("user-agent");
        has_content_type |= name.eq_ignore_ascii_case("content-type");
        builder = builder.header(name, value.trim());
    }

    if let Some(cookie) = options.text(&OptionKey::COOKIE) {
        builder = builder.header(header::COOKIE, cookie);
    }
    if !has_user_agent && let Some(agent) = options.text(&OptionKey::USER_AGENT) {
        builder = builder.header(header::USER_AGENT, agent);
    }
    if let Some(referer) = options.text(&OptionKey::REFERER) {
        builder = builder.header(header::REFERER, referer);
    }
    if let Some(credentials) = options.text(&OptionKey::USER_PWD) {
        builder = builder.header(
            header::AUTHORIZATION,
            format!("Basic {}", STANDARD.encode(credentials)),
        );
    }

    let body = if send_body {
        match options.get(&OptionKey::POST_FIELDS) {
            Some(OptionValue::Text(text)) => Bytes::from(text.clone()),
            Some(OptionValue::Fields(fields)) => Bytes::from(
                QueryEncoder::new()
                    .dialect(EncodingDialect::Rfc1738)
                    .encode(fields),
            ),
            Some(other) => {
                return Err(Failure::new(
                    codes::BAD_FUNCTION_ARGUMENT,
                    format!("unsupported body value: {other:?}"),
                ));
            }
            None => Bytes::new(),
        }
    } else {
        Bytes::new()
    };

    if !body.is_empty() && !has_content_type {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    }

    builder.body(Full::new(body)).map_err(|e| {
        Failure::new(codes::BAD_FUNCTION_ARGUMENT, format!("invalid request: {e}"))
    })
}
