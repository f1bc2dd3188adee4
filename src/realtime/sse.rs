/// One dispatched server-sent event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

/// Incremental `text/event-stream` decoder.
///
/// Bytes may arrive split anywhere (including inside a UTF-8 sequence); only
/// complete lines are interpreted.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.pending.extend_from_slice(chunk);
        let mut out = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(ev) = self.process_line(&line) {
                out.push(ev);
            }
        }
        out
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id/retry are not used by the store protocol.
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() && event.is_none() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent {
            event: event.unwrap_or_else(|| "message".to_string()),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_put_event() {
        let mut d = SseDecoder::default();
        let out = d.feed(b"event: put\ndata: {\"path\":\"/\",\"data\":null}\n\n");
        assert_eq!(
            out,
            vec![SseEvent {
                event: "put".to_string(),
                data: "{\"path\":\"/\",\"data\":null}".to_string(),
            }]
        );
    }

    #[test]
    fn handles_chunk_boundaries_and_crlf() {
        let mut d = SseDecoder::default();
        assert!(d.feed(b"event: pa").is_empty());
        assert!(d.feed(b"tch\r\ndata: {\"a\"").is_empty());
        let out = d.feed(b":1}\r\n\r\nevent: keep-alive\r\ndata: null\r\n\r\n");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].event, "patch");
        assert_eq!(out[0].data, "{\"a\":1}");
        assert_eq!(out[1].event, "keep-alive");
    }

    #[test]
    fn joins_multiline_data_and_skips_comments() {
        let mut d = SseDecoder::default();
        let out = d.feed(b": hello\ndata: a\ndata: b\n\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].event, "message");
        assert_eq!(out[0].data, "a\nb");
    }

    #[test]
    fn utf8_split_across_chunks() {
        let mut d = SseDecoder::default();
        let bytes = "data: \u{e9}t\u{e9}\n\n".as_bytes();
        let (a, b) = bytes.split_at(7);
        assert!(d.feed(a).is_empty());
        let out = d.feed(b);
        assert_eq!(out[0].data, "\u{e9}t\u{e9}");
    }
}
