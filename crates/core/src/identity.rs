//! Caller identity and the practitioner verification collaborator.
//!
//! Verification here is a directory lookup, not a call out to a credential registry: a doctor is
//! accepted when they name a listed hospital and supply a plausibly long medical id.

use crate::constants::MIN_MEDICAL_ID_LEN;
use crate::hospitals::{HospitalDirectory, HospitalEntry};
use crate::{CaseError, CaseResult};
use chrono::{DateTime, Utc};
use oncora_types::{NonEmptyText, Region};

/// The authenticated actor on whose behalf a request is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: NonEmptyText,
    pub region: Option<Region>,
    pub verified: bool,
}

/// Credentials presented for verification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub medical_id: String,
    pub hospital_id: String,
    /// Region as chosen by the practitioner; may be a wire value or a display label.
    pub region: Option<String>,
    pub email: Option<String>,
}

/// Outcome of a successful verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedDoctor {
    pub identity: CallerIdentity,
    pub medical_id: String,
    pub hospital: HospitalEntry,
    pub email: Option<String>,
    pub verified_at: DateTime<Utc>,
}

pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> CaseResult<VerifiedDoctor>;
}

pub const VERIFICATION_FAILED: &str = "Verification failed. Please check your credentials.";

/// Verifies practitioners against a [`HospitalDirectory`].
#[derive(Clone, Debug, Default)]
pub struct DirectoryVerifier {
    directory: HospitalDirectory,
}

impl DirectoryVerifier {
    pub fn new(directory: HospitalDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &HospitalDirectory {
        &self.directory
    }
}

/// Accepts either the wire form (`us-west`) or a display label (`US West`).
fn region_from_choice(choice: &str) -> Option<Region> {
    let normalised = choice.trim().to_lowercase().replace([' ', '_'], "-");
    normalised.parse().ok()
}

impl IdentityVerifier for DirectoryVerifier {
    fn verify(&self, credentials: &Credentials) -> CaseResult<VerifiedDoctor> {
        let medical_id = credentials.medical_id.trim();
        let hospital = self.directory.find(credentials.hospital_id.trim());

        let hospital = match hospital {
            Some(h) if medical_id.chars().count() >= MIN_MEDICAL_ID_LEN => h.clone(),
            _ => {
                tracing::warn!(
                    hospital = %credentials.hospital_id,
                    "practitioner verification rejected"
                );
                return Err(CaseError::Validation(VERIFICATION_FAILED.into()));
            }
        };

        let verified_at = Utc::now();
        let doctor_id = format!("dr-{}-{}", medical_id, verified_at.timestamp_millis());
        let id = NonEmptyText::new(&doctor_id)
            .map_err(|e| CaseError::Internal(format!("doctor id: {e}")))?;
        let region = credentials
            .region
            .as_deref()
            .and_then(region_from_choice)
            .unwrap_or(hospital.region);

        tracing::info!(doctor = %id, hospital = %hospital.id, "practitioner verified");

        Ok(VerifiedDoctor {
            identity: CallerIdentity {
                id,
                region: Some(region),
                verified: true,
            },
            medical_id: medical_id.to_string(),
            hospital,
            email: credentials.email.clone(),
            verified_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(medical_id: &str, hospital_id: &str, region: Option<&str>) -> Credentials {
        Credentials {
            medical_id: medical_id.into(),
            hospital_id: hospital_id.into(),
            region: region.map(str::to_string),
            email: Some("doc@example.org".into()),
        }
    }

    #[test]
    fn accepts_listed_hospital_and_long_medical_id() {
        let doctor = DirectoryVerifier::default()
            .verify(&credentials("MD123456", "mayo-clinic", None))
            .expect("verified");

        assert!(doctor.identity.verified);
        assert!(doctor.identity.id.as_str().starts_with("dr-MD123456-"));
        assert_eq!(doctor.identity.region, Some(Region::UsMidwest));
        assert_eq!(doctor.hospital.name, "Mayo Clinic");
    }

    #[test]
    fn explicit_region_label_overrides_hospital_region() {
        let doctor = DirectoryVerifier::default()
            .verify(&credentials("MD123456", "ucsf", Some("Asia Pacific")))
            .expect("verified");
        assert_eq!(doctor.identity.region, Some(Region::AsiaPacific));
    }

    #[test]
    fn unparseable_region_falls_back_to_hospital() {
        let doctor = DirectoryVerifier::default()
            .verify(&credentials("MD123456", "ucsf", Some("Narnia")))
            .expect("verified");
        assert_eq!(doctor.identity.region, Some(Region::UsWest));
    }

    #[test]
    fn rejects_unknown_hospital() {
        let err = DirectoryVerifier::default()
            .verify(&credentials("MD123456", "st-elsewhere", None))
            .expect_err("unknown hospital");
        assert!(err.is_validation());
        assert!(err.to_string().contains(VERIFICATION_FAILED));
    }

    #[test]
    fn rejects_short_medical_id() {
        let err = DirectoryVerifier::default()
            .verify(&credentials("12345", "mgh", None))
            .expect_err("short id");
        assert!(err.is_validation());
    }
}
