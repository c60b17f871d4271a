//! Minimal ReQL wire client.
//!
//! Speaks the V0_4 JSON driver protocol: a handshake of version magic, auth-key frame and
//! protocol magic, then token-framed JSON queries (`[START, term, opts]`) with token-framed
//! JSON responses. Sequences that arrive in chunks are paged with `CONTINUE` until the server
//! reports the sequence complete.

use crate::{
    config::Config,
    source::{
        term,
        SourceError,
        StatsSource,
    },
    stats::{
        ClusterStats,
        MemberId,
        MemberStats,
        ServerStatus,
        TableStats,
        TableStatus,
    },
};
use serde::de::DeserializeOwned;
use serde_json::{
    json,
    Value,
};
use tokio::{
    io::{
        AsyncReadExt,
        AsyncWriteExt,
    },
    net::TcpStream,
};
use tracing::debug;

const VERSION_V0_4: u32 = 0x400c_2d20;
const PROTOCOL_JSON: u32 = 0x7e69_70c7;

// Query frame types.
const START: u64 = 1;
const CONTINUE: u64 = 2;

// Response types.
const SUCCESS_ATOM: u64 = 1;
const SUCCESS_SEQUENCE: u64 = 2;
const SUCCESS_PARTIAL: u64 = 3;
const CLIENT_ERROR: u64 = 16;
const COMPILE_ERROR: u64 = 17;
const RUNTIME_ERROR: u64 = 18;

/// The preamble sent immediately after the TCP connect. The auth key is included only when
/// one is configured; otherwise the key frame is empty.
fn handshake_frame(auth_key: Option<&str>) -> Vec<u8> {
    let key = auth_key.unwrap_or("");
    let mut frame = Vec::with_capacity(12 + key.len());
    frame.extend_from_slice(&VERSION_V0_4.to_le_bytes());
    frame.extend_from_slice(&(key.len() as u32).to_le_bytes());
    frame.extend_from_slice(key.as_bytes());
    frame.extend_from_slice(&PROTOCOL_JSON.to_le_bytes());
    frame
}

/// `token (u64 LE) | length (u32 LE) | json payload`
fn query_frame(token: u64, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(12 + payload.len());
    frame.extend_from_slice(&token.to_le_bytes());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// A live connection to one RethinkDB server, exclusively owned by one poll cycle.
pub struct ReqlSource {
    stream: TcpStream,
    next_token: u64,
}

impl ReqlSource {
    /// Connect and perform the driver handshake.
    pub async fn connect(config: &Config) -> Result<Self, SourceError> {
        let addr = config.addr();
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| SourceError::Connect { addr, source })?;

        let mut client = Self { stream, next_token: 1 };
        client.handshake(config.auth_key.as_deref()).await?;
        debug!(host = %config.host, port = config.port, "connected to RethinkDB");
        Ok(client)
    }

    /// Close the connection. Errors are irrelevant at this point; the cycle is over.
    pub async fn close(mut self) {
        let _ = self.stream.shutdown().await;
    }

    async fn handshake(&mut self, auth_key: Option<&str>) -> Result<(), SourceError> {
        self.stream.write_all(&handshake_frame(auth_key)).await?;

        // The server answers with a null-terminated status string.
        let mut status = Vec::new();
        loop {
            let byte = self.stream.read_u8().await?;
            if byte == 0 {
                break;
            }
            status.push(byte);
            if status.len() > 1024 {
                return Err(SourceError::Protocol("oversized handshake response".to_string()));
            }
        }

        let status = String::from_utf8_lossy(&status);
        if status != "SUCCESS" {
            return Err(SourceError::Handshake(status.into_owned()));
        }
        Ok(())
    }

    async fn send(&mut self, token: u64, body: &Value) -> Result<(), SourceError> {
        let payload = serde_json::to_vec(body)?;
        self.stream.write_all(&query_frame(token, &payload)).await?;
        Ok(())
    }

    async fn read_response(&mut self) -> Result<(u64, Value), SourceError> {
        let token = self.stream.read_u64_le().await?;
        let len = self.stream.read_u32_le().await? as usize;

        let mut payload = vec![0u8; len];
        self.stream.read_exact(&mut payload).await?;

        let body = serde_json::from_slice(&payload)?;
        Ok((token, body))
    }

    /// Run one term to completion, paging partial sequences, and return the result rows. An
    /// atom result (e.g. from a `get`) is returned as a single row.
    async fn run(&mut self, term: Value) -> Result<Vec<Value>, SourceError> {
        let token = self.next_token;
        self.next_token += 1;
        self.send(token, &json!([START, term, {}])).await?;

        let mut rows = Vec::new();
        loop {
            let (response_token, response) = self.read_response().await?;
            if response_token != token {
                return Err(SourceError::Protocol(format!(
                    "response token {response_token} does not match query token {token}"
                )));
            }

            let response_type = response.get("t").and_then(Value::as_u64).unwrap_or(0);
            let mut result = response
                .get("r")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            match response_type {
                SUCCESS_ATOM | SUCCESS_SEQUENCE => {
                    rows.append(&mut result);
                    return Ok(rows);
                }
                SUCCESS_PARTIAL => {
                    rows.append(&mut result);
                    self.send(token, &json!([CONTINUE])).await?;
                }
                CLIENT_ERROR | COMPILE_ERROR | RUNTIME_ERROR => {
                    let message = result
                        .first()
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string();
                    return Err(SourceError::Query(message));
                }
                other => {
                    return Err(SourceError::Protocol(format!("unexpected response type {other}")));
                }
            }
        }
    }

    /// Point read into a system table. A `null` atom means the document does not exist.
    async fn point_read<T: DeserializeOwned>(&mut self, table: &str, key_parts: &[&str]) -> Result<T, SourceError> {
        let rows = self.run(term::system_table_get(table, key_parts)).await?;
        match rows.into_iter().next() {
            None | Some(Value::Null) => Err(SourceError::Missing),
            Some(document) => Ok(serde_json::from_value(document)?),
        }
    }

    /// Equality scan over a whole system table.
    async fn scan<T: DeserializeOwned>(&mut self, table: &str) -> Result<Vec<T>, SourceError> {
        let rows = self.run(term::system_table(table)).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(SourceError::from))
            .collect()
    }
}

impl StatsSource for ReqlSource {
    async fn server_status(&mut self) -> Result<Vec<ServerStatus>, SourceError> {
        self.scan("server_status").await
    }

    async fn cluster_stats(&mut self) -> Result<ClusterStats, SourceError> {
        self.point_read("stats", &["cluster"]).await
    }

    async fn member_stats(&mut self, member: &MemberId) -> Result<MemberStats, SourceError> {
        self.point_read("stats", &["server", member.0.as_str()]).await
    }

    async fn table_status(&mut self) -> Result<Vec<TableStatus>, SourceError> {
        self.scan("table_status").await
    }

    async fn table_stats(&mut self, table_id: &str, member: &MemberId) -> Result<TableStats, SourceError> {
        self.point_read("stats", &["table_server", table_id, member.0.as_str()])
            .await
    }
}
