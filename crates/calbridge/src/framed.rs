//! Out-of-process binding over a length-prefixed JSON stream.
//!
//! [`FramedBinding`] drives a native host through any async byte stream
//! (Unix socket, pipe pair, TCP). Every call is one request frame
//! `Envelope<NativeCall>` answered by one reply frame `Envelope<NativeReply>`.
//! Calls on the same binding are serialized; the stream carries one exchange
//! at a time.
//!
//! A call dropped while waiting (under `timeout` or `select!`) leaves its
//! reply in flight. The binding remembers the request id and discards that
//! reply when it arrives, so the next call only ever sees its own answer.
//! Failures that leave the stream position unknown (a frame cut short, an
//! oversized prefix, a reply nobody asked for) put the binding out of
//! service: every later call fails with a transport error.

use std::collections::HashSet;

use calbridge_core::Platform;
use calbridge_protocol::{
    Envelope, NativeCall, NativeMethod, NativeReply, ProtocolError, ProtocolResult,
    decode_message, encode_message, frame_len, payload_len,
};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::binding::{BoxFuture, NativeBinding};
use crate::error::{NativeError, NativeResult};
use crate::profile::PlatformProfile;

const READ_CHUNK: usize = 4096;

/// A [`NativeBinding`] talking to a native host over a framed stream.
pub struct FramedBinding<S> {
    channel: Mutex<Channel<S>>,
    methods: HashSet<NativeMethod>,
}

/// The stream and what is known about its position.
struct Channel<S> {
    stream: S,
    /// Bytes read but not yet consumed as a frame.
    inbox: Vec<u8>,
    /// Request ids written whose reply has not been read.
    outstanding: Vec<String>,
    /// Set while a request frame is being written.
    writing: bool,
    broken: bool,
}

impl<S> FramedBinding<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Creates a binding over `stream` advertising the methods of `platform`.
    pub fn new(stream: S, platform: Platform) -> Self {
        Self {
            channel: Mutex::new(Channel {
                stream,
                inbox: Vec::new(),
                outstanding: Vec::new(),
                writing: false,
                broken: false,
            }),
            methods: PlatformProfile::for_platform(platform)
                .methods
                .iter()
                .copied()
                .collect(),
        }
    }

    /// Builder method to replace the advertised capability table.
    ///
    /// Use this when the host reports its own entry points.
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = NativeMethod>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Returns the underlying stream, consuming the binding.
    pub fn into_inner(self) -> S {
        self.channel.into_inner().stream
    }

    async fn call(&self, call: NativeCall) -> NativeResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        let method = call.method;
        let envelope = Envelope::new(&request_id, call);

        let reply = self
            .exchange(&envelope)
            .await
            .map_err(|e| NativeError::transport(&e))?;

        if !reply.is_compatible() {
            let err = ProtocolError::UnsupportedVersion(reply.protocol_version);
            return Err(NativeError::transport(&err));
        }

        match reply.payload {
            NativeReply::Success { data } => Ok(data),
            NativeReply::Error { code, message } => {
                let err = NativeError::new(code, message);
                debug!(%method, code = err.code(), "native host rejected call");
                Err(err)
            }
        }
    }

    /// Performs the framed request-reply exchange while holding the stream.
    async fn exchange(
        &self,
        envelope: &Envelope<NativeCall>,
    ) -> ProtocolResult<Envelope<NativeReply>> {
        let frame = encode_message(envelope)?;
        let mut channel = self.channel.lock().await;

        if channel.writing {
            warn!("an earlier request was interrupted mid-frame");
            channel.broken = true;
        }
        if channel.broken {
            return Err(ProtocolError::Desynchronized);
        }

        debug!(
            request_id = %envelope.request_id,
            method = %envelope.payload.method,
            pending = channel.outstanding.len(),
            "sending request"
        );

        let result = channel.round_trip(&envelope.request_id, &frame).await;
        if let Err(err) = &result {
            // A malformed but complete frame has already been consumed.
            if !matches!(err, ProtocolError::Serialization(_)) {
                channel.broken = true;
            }
        }
        result
    }
}

impl<S> Channel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Writes `frame` and reads until the reply to `request_id` arrives.
    async fn round_trip(
        &mut self,
        request_id: &str,
        frame: &[u8],
    ) -> ProtocolResult<Envelope<NativeReply>> {
        self.writing = true;
        self.stream.write_all(frame).await?;
        self.stream.flush().await?;
        self.writing = false;
        self.outstanding.push(request_id.to_string());

        loop {
            let reply = self.next_reply().await?;
            let Some(pos) = self.outstanding.iter().position(|id| *id == reply.request_id) else {
                return Err(ProtocolError::UnexpectedReply(reply.request_id));
            };
            self.outstanding.remove(pos);
            if reply.request_id == request_id {
                return Ok(reply);
            }
            warn!(request_id = %reply.request_id, "discarding reply to an abandoned call");
        }
    }

    /// Reads the next reply frame.
    ///
    /// Cancel safe: bytes already read stay in `inbox`.
    async fn next_reply(&mut self) -> ProtocolResult<Envelope<NativeReply>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(len) = frame_len(&self.inbox)? {
                let frame: Vec<u8> = self.inbox.drain(..len).collect();
                return decode_message(&frame);
            }
            match self.stream.read(&mut chunk).await? {
                0 if self.inbox.is_empty() => return Err(ProtocolError::Closed),
                0 => {
                    let expected = match self.inbox.first_chunk::<4>() {
                        Some(prefix) => 4 + payload_len(*prefix)?,
                        None => 4,
                    };
                    return Err(ProtocolError::IncompleteMessage {
                        expected,
                        received: self.inbox.len(),
                    });
                }
                n => self.inbox.extend_from_slice(&chunk[..n]),
            }
        }
    }
}

impl<S> NativeBinding for FramedBinding<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        "framed"
    }

    fn supports(&self, method: NativeMethod) -> bool {
        self.methods.contains(&method)
    }

    fn invoke(&self, call: NativeCall) -> BoxFuture<'_, NativeResult<Value>> {
        Box::pin(self.call(call))
    }
}

impl<S> std::fmt::Debug for FramedBinding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramedBinding")
            .field("methods", &self.methods.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use calbridge_core::PermissionStatus;
    use calbridge_protocol::{MAX_MESSAGE_SIZE, read_frame, write_frame};
    use serde_json::json;
    use tokio::io::DuplexStream;
    use tokio::time::timeout;

    use super::*;
    use crate::bridge::CalendarBridge;
    use crate::error::TRANSPORT_ERROR_CODE;

    /// Answers every request frame on `stream` with `answer`.
    async fn host<F>(mut stream: DuplexStream, answer: F)
    where
        F: Fn(&NativeCall) -> NativeReply,
    {
        while let Ok(Some(request)) = read_frame::<_, Envelope<NativeCall>>(&mut stream).await {
            let reply = Envelope::new(request.request_id.clone(), answer(&request.payload));
            write_frame(&mut stream, &reply).await.unwrap();
        }
    }

    fn spawn_host<F>(answer: F) -> DuplexStream
    where
        F: Fn(&NativeCall) -> NativeReply + Send + 'static,
    {
        let (client, server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(host(server, answer));
        client
    }

    #[tokio::test]
    async fn success_reply_reaches_the_bridge() {
        let stream = spawn_host(|call| match call.method {
            NativeMethod::GetCalendars => NativeReply::success(json!([{
                "id": "c1",
                "title": "Home",
                "source": {"type": "local", "name": "Default"},
            }])),
            _ => NativeReply::error("E_UNEXPECTED", call.method.as_str()),
        });
        let binding = Arc::new(FramedBinding::new(stream, Platform::Ios));
        let bridge = CalendarBridge::for_platform(binding, Platform::Ios);

        let calendars = bridge.get_calendars(None).await.unwrap();
        assert_eq!(calendars[0].id, "c1");
        assert_eq!(calendars[0].title, "Home");
    }

    #[tokio::test]
    async fn abandoned_call_does_not_leak_its_reply() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            while let Ok(Some(request)) = read_frame::<_, Envelope<NativeCall>>(&mut server).await {
                let method = request.payload.method;
                if method == NativeMethod::GetCalendars {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                let reply = Envelope::new(request.request_id, NativeReply::success(json!(method.as_str())));
                if write_frame(&mut server, &reply).await.is_err() {
                    break;
                }
            }
        });
        let binding = FramedBinding::new(client, Platform::Ios);

        let first = timeout(
            Duration::from_millis(10),
            binding.invoke(NativeCall::bare(NativeMethod::GetCalendars)),
        )
        .await;
        assert!(first.is_err());

        let second = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap();
        assert_eq!(second, json!("getSourcesAsync"));

        let third = binding
            .invoke(NativeCall::bare(NativeMethod::GetCalendars))
            .await
            .unwrap();
        assert_eq!(third, json!("getCalendarsAsync"));
    }

    #[tokio::test]
    async fn reply_for_unknown_request_takes_the_stream_out_of_service() {
        let stream = {
            let (client, mut server) = tokio::io::duplex(64 * 1024);
            tokio::spawn(async move {
                while let Ok(Some(_)) = read_frame::<_, Envelope<NativeCall>>(&mut server).await {
                    let reply = Envelope::new("someone-else", NativeReply::success(Value::Null));
                    if write_frame(&mut server, &reply).await.is_err() {
                        break;
                    }
                }
            });
            client
        };
        let binding = FramedBinding::new(stream, Platform::Ios);

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.message(), "reply for unknown request \"someone-else\"");

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(
            err.message(),
            "stream to the native host is out of sync after an earlier failure"
        );
    }

    #[tokio::test]
    async fn oversized_reply_takes_the_stream_out_of_service() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let _: Option<Envelope<NativeCall>> = read_frame(&mut server).await.unwrap();
            server
                .write_all(&(MAX_MESSAGE_SIZE + 1).to_be_bytes())
                .await
                .unwrap();
            // Keep the stream open so only the prefix decides.
            let _: ProtocolResult<Option<Envelope<NativeCall>>> = read_frame(&mut server).await;
        });
        let binding = FramedBinding::new(client, Platform::Android);

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetCalendars))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "frame of 1048577 bytes exceeds the 1048576 byte limit");

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetCalendars))
            .await
            .unwrap_err();
        assert_eq!(err.code(), TRANSPORT_ERROR_CODE);
        assert_eq!(
            err.message(),
            "stream to the native host is out of sync after an earlier failure"
        );
    }

    #[tokio::test]
    async fn interrupted_write_takes_the_stream_out_of_service() {
        // The host never reads, so the request cannot be written in full.
        let (client, _server) = tokio::io::duplex(16);
        let binding = FramedBinding::new(client, Platform::Ios);

        let first = timeout(
            Duration::from_millis(10),
            binding.invoke(NativeCall::bare(NativeMethod::GetCalendars)),
        )
        .await;
        assert!(first.is_err());

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "stream to the native host is out of sync after an earlier failure"
        );
    }

    #[tokio::test]
    async fn malformed_reply_fails_only_its_own_call() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let mut garbled = true;
            while let Ok(Some(request)) = read_frame::<_, Envelope<NativeCall>>(&mut server).await {
                if std::mem::take(&mut garbled) {
                    server.write_all(&[0, 0, 0, 2, b'{', b'x']).await.unwrap();
                    continue;
                }
                let reply = Envelope::new(request.request_id, NativeReply::success(json!("ok")));
                if write_frame(&mut server, &reply).await.is_err() {
                    break;
                }
            }
        });
        let binding = FramedBinding::new(client, Platform::Ios);

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.message().starts_with("malformed JSON frame"));

        let ok = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap();
        assert_eq!(ok, json!("ok"));
    }

    #[tokio::test]
    async fn error_reply_keeps_code_and_message() {
        let stream = spawn_host(|_| {
            NativeReply::error("E_EVENT_NOT_FOUND", "Event with id 'e9' could not be found")
        });
        let binding = FramedBinding::new(stream, Platform::Android);

        let err = binding
            .invoke(NativeCall::new(NativeMethod::DeleteEvent, vec![json!({"id": "e9"})]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E_EVENT_NOT_FOUND");
        assert_eq!(err.message(), "Event with id 'e9' could not be found");
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn sequential_calls_share_the_stream() {
        let stream = spawn_host(|call| match call.method {
            NativeMethod::GetCalendarPermissions => NativeReply::success(json!({
                "status": "denied",
                "expires": "never",
                "granted": false,
                "canAskAgain": false
            })),
            _ => NativeReply::success(Value::Null),
        });
        let binding = Arc::new(FramedBinding::new(stream, Platform::Android));
        let bridge = CalendarBridge::for_platform(binding, Platform::Android);

        for _ in 0..3 {
            let response = bridge.get_calendar_permissions().await.unwrap();
            assert_eq!(response.status, PermissionStatus::Denied);
        }
        bridge.delete_calendar("c1").await.unwrap();
    }

    #[tokio::test]
    async fn closed_stream_is_a_transport_error() {
        let (client, server) = tokio::io::duplex(1024);
        drop(server);
        let binding = FramedBinding::new(client, Platform::Ios);

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap_err();
        assert_eq!(err.code(), TRANSPORT_ERROR_CODE);
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn incompatible_reply_version_is_rejected() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let request: Envelope<NativeCall> = read_frame(&mut server).await.unwrap().unwrap();
            let mut reply = Envelope::new(request.request_id, NativeReply::success(Value::Null));
            reply.protocol_version = "2".to_string();
            write_frame(&mut server, &reply).await.unwrap();
        });
        let binding = FramedBinding::new(client, Platform::Ios);

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetSources))
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.message(), "native host speaks protocol version \"2\"");
    }

    #[tokio::test]
    async fn host_hanging_up_before_replying_is_reported() {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let _: Option<Envelope<NativeCall>> = read_frame(&mut server).await.unwrap();
        });
        let binding = FramedBinding::new(client, Platform::Android);

        let err = binding
            .invoke(NativeCall::bare(NativeMethod::GetCalendars))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "native host closed the stream");
    }

    #[test]
    fn capabilities_default_to_platform_profile() {
        let (client, _server) = tokio::io::duplex(16);
        let binding = FramedBinding::new(client, Platform::Android);
        assert!(binding.supports(NativeMethod::OpenEventInCalendar));
        assert!(!binding.supports(NativeMethod::GetSources));

        let binding = binding.with_methods([NativeMethod::GetSources]);
        assert!(binding.supports(NativeMethod::GetSources));
        assert!(!binding.supports(NativeMethod::GetCalendars));
    }
}
