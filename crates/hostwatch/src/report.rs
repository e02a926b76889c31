use hostwatch_core::{Error, IoError, ProbeOutcome, Report, Sequence, Target, READ_TIMEOUT};
use std::io::Write;

/// Report every attempt as a line of text.
pub struct ConsoleReport<W> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Report for ConsoleReport<W> {
    fn report(&mut self, target: &Target, sequence: Sequence, outcome: &ProbeOutcome) {
        if let Some(line) = format_outcome(target, sequence, outcome) {
            if let Err(err) = writeln!(self.out, "{line}") {
                tracing::debug!(%err, "failed to write report");
            }
        }
    }
}

/// The line describing an attempt, `None` if there is nothing to say.
fn format_outcome(target: &Target, sequence: Sequence, outcome: &ProbeOutcome) -> Option<String> {
    let addr = target.addr;
    Some(match outcome {
        ProbeOutcome::Success { peer, sequence, rtt } => {
            format!("PING reply from {peer}: seq={sequence} time={rtt:?} ({})", target.family)
        }
        ProbeOutcome::Timeout => {
            format!("Ping {sequence} to {addr}: timeout or error (no reply within {READ_TIMEOUT:?})")
        }
        ProbeOutcome::TransportError {
            cause: cause @ Error::IoError(IoError::SendTo(..)),
        } => format!("Error sending ICMP packet to {addr}: {cause}"),
        ProbeOutcome::TransportError { cause } => {
            format!("Error creating ICMP connection ({}): {cause}", target.family)
        }
        ProbeOutcome::ProtocolMismatch {
            observed_type,
            peer,
        } => format!("Ping {sequence} to {addr}: received ICMP {observed_type} from {peer}"),
        ProbeOutcome::CorrelationMismatch {
            observed_identifier,
            observed_sequence,
            peer,
        } => format!(
            "Ping {sequence} to {addr}: received Echo Reply with wrong ID/seq (ID={observed_identifier}, seq={observed_sequence}) from {peer}"
        ),
        ProbeOutcome::MalformedReply { peer } => {
            format!("Ping {sequence} to {addr}: failed to parse ICMP message from {peer}")
        }
        ProbeOutcome::Cancelled => return None,
    })
}
