//! Static hospital directory used by identity verification.

use oncora_types::Region;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalEntry {
    pub id: String,
    pub name: String,
    pub region: Region,
    pub verified: bool,
}

impl HospitalEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, region: Region) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region,
            verified: true,
        }
    }
}

/// Read-only list of participating hospitals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HospitalDirectory {
    entries: Vec<HospitalEntry>,
}

impl HospitalDirectory {
    pub fn new(entries: Vec<HospitalEntry>) -> Self {
        Self { entries }
    }

    pub fn list(&self) -> &[HospitalEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&HospitalEntry> {
        self.entries.iter().find(|h| h.id == id)
    }
}

impl Default for HospitalDirectory {
    fn default() -> Self {
        Self::new(vec![
            HospitalEntry::new("mayo-clinic", "Mayo Clinic", Region::UsMidwest),
            HospitalEntry::new("johns-hopkins", "Johns Hopkins Hospital", Region::UsNortheast),
            HospitalEntry::new("cleveland-clinic", "Cleveland Clinic", Region::UsMidwest),
            HospitalEntry::new("mgh", "Massachusetts General Hospital", Region::UsNortheast),
            HospitalEntry::new("ucsf", "UCSF Medical Center", Region::UsWest),
            HospitalEntry::new("cedars-sinai", "Cedars-Sinai Medical Center", Region::UsWest),
        ])
    }
}
