/*!
`ResultRecord`: the one JSON object a `run` invocation writes to stdout.

Shapes:
  success: {"status":"success","action":<name>,"output_file":<path>, ...extra}
  error:   {"status":"error","message":<string>}
  fatal:   {"status":"fatal","error_type":<string>,"message":<string>}

Exit codes: success 0, error 1, fatal 2.
*/

use std::io::Write;

use serde::Serialize;

use crate::error::{as_command_error, fault_kind};
use crate::processor::Outcome;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_FATAL: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultRecord {
    Success(Outcome),
    Error { message: String },
    Fatal { error_type: String, message: String },
}

impl ResultRecord {
    pub fn success(outcome: Outcome) -> Self {
        ResultRecord::Success(outcome)
    }

    pub fn error(message: impl Into<String>) -> Self {
        ResultRecord::Error {
            message: message.into(),
        }
    }

    pub fn fatal(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        ResultRecord::Fatal {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Fold a processor result into a record. A [`CommandError`](crate::error::CommandError)
    /// anywhere in the chain makes it an `error`; everything else is `fatal`.
    pub fn from_outcome(result: anyhow::Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => ResultRecord::success(outcome),
            Err(err) => match as_command_error(&err) {
                Some(business) => ResultRecord::error(business.to_string()),
                None => ResultRecord::fatal(fault_kind(&err), err.to_string()),
            },
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ResultRecord::Success(_) => "success",
            ResultRecord::Error { .. } => "error",
            ResultRecord::Fatal { .. } => "fatal",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ResultRecord::Success(_) => EXIT_SUCCESS,
            ResultRecord::Error { .. } => EXIT_ERROR,
            ResultRecord::Fatal { .. } => EXIT_FATAL,
        }
    }

    /// Single-line JSON. If the record cannot be serialized (e.g. a non UTF-8
    /// path), a fatal record describing that failure is produced instead.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({
                "status": "fatal",
                "error_type": "SerializationError",
                "message": format!("failed to serialize result: {e}"),
            })
            .to_string()
        })
    }

    /// Write the record to `out` followed by a newline.
    pub fn write_to(&self, mut out: impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.to_json_line())?;
        out.flush()
    }

    /// Write the record to stdout. Returns the exit code the process should use.
    pub fn emit(&self) -> u8 {
        let stdout = std::io::stdout();
        match self.write_to(stdout.lock()) {
            Ok(()) => self.exit_code(),
            Err(e) => {
                tracing::error!("failed to write result to stdout: {e}");
                EXIT_FATAL
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Action;
    use crate::error::{CommandError, OptionsError};
    use serde_json::{Value, json};
    use std::path::PathBuf;

    fn parse(record: &ResultRecord) -> Value {
        serde_json::from_str(&record.to_json_line()).unwrap()
    }

    #[test]
    fn success_shape() {
        let outcome = Outcome::new(Action::LayerMerge, PathBuf::from("/tmp/d_merged.dxf"))
            .with("details", "Merged 5 layers into WALLS")
            .unwrap();
        let rec = ResultRecord::from_outcome(Ok(outcome));
        assert_eq!(
            parse(&rec),
            json!({
                "status": "success",
                "action": "layer_merge",
                "output_file": "/tmp/d_merged.dxf",
                "details": "Merged 5 layers into WALLS"
            })
        );
        assert_eq!(rec.exit_code(), 0);
    }

    #[test]
    fn business_error_shape() {
        let err = anyhow::Error::new(CommandError::UnknownCommand("unknown_op".into()));
        let rec = ResultRecord::from_outcome(Err(err));
        assert_eq!(
            parse(&rec),
            json!({"status": "error", "message": "unknown command 'unknown_op'"})
        );
        assert_eq!(rec.exit_code(), 1);
    }

    #[test]
    fn fatal_shape() {
        let src = serde_json::from_str::<Value>("{bad").unwrap_err();
        let err = anyhow::Error::new(OptionsError::Malformed(src));
        let rec = ResultRecord::from_outcome(Err(err));
        let v = parse(&rec);
        assert_eq!(v["status"], "fatal");
        assert_eq!(v["error_type"], "MalformedOptions");
        assert!(v["message"].as_str().unwrap().starts_with("malformed options JSON"));
        assert_eq!(rec.exit_code(), 2);
    }

    #[test]
    fn status_always_present() {
        for rec in [
            ResultRecord::error("x"),
            ResultRecord::fatal("InternalError", "y"),
            ResultRecord::success(Outcome::new(Action::Flatten, PathBuf::from("a_flattened"))),
        ] {
            assert_eq!(parse(&rec)["status"], rec.status());
        }
    }

    #[test]
    fn write_to_emits_one_line() {
        let mut buf = Vec::new();
        ResultRecord::error("nope").write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
    }
}
