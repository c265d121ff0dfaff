//! Cross-frame messages posted to the embedding page.

use fhir::PatientRecord;
use serde::{Deserialize, Serialize};

/// Payload posted to the parent frame in cross-frame mode. No acknowledgement is expected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FrameMessage {
    /// `{ "type": "patientSelected", "patient": { ... } }`
    PatientSelected { patient: PatientRecord },
    /// `{ "type": "modalClosed" }`, sent when the modal is dismissed without a selection.
    ModalClosed,
}

impl FrameMessage {
    /// JSON form of the message, as handed to `postMessage`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to serialise frame message");
            serde_json::Value::Null
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn modal_closed_wire_shape() {
        assert_eq!(FrameMessage::ModalClosed.to_json(), json!({ "type": "modalClosed" }));
    }

    #[test]
    fn patient_selected_carries_the_record_as_received() {
        let patient = PatientRecord::from_value(json!({
            "resourceType": "Patient",
            "id": "p1",
            "name": [{ "family": "Doe", "given": ["John"] }],
            "active": true
        }))
        .expect("valid");
        let message = FrameMessage::PatientSelected { patient };
        assert_eq!(
            message.to_json(),
            json!({
                "type": "patientSelected",
                "patient": {
                    "resourceType": "Patient",
                    "id": "p1",
                    "name": [{ "family": "Doe", "given": ["John"] }],
                    "active": true
                }
            })
        );

        let back: FrameMessage = serde_json::from_value(message.to_json()).expect("parse");
        assert_eq!(back, message);
    }
}
