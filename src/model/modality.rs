#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Functional,
    Anatomical,
    Diffusion,
    FieldMap,
}

impl Modality {
    pub fn from_datatype(datatype: &str) -> Option<Self> {
        match datatype {
            "func" => Some(Modality::Functional),
            "anat" => Some(Modality::Anatomical),
            "dwi" => Some(Modality::Diffusion),
            "fmap" => Some(Modality::FieldMap),
            _ => None,
        }
    }

    pub fn datatype(self) -> &'static str {
        match self {
            Modality::Functional => "func",
            Modality::Anatomical => "anat",
            Modality::Diffusion => "dwi",
            Modality::FieldMap => "fmap",
        }
    }

    /// Sidecar fields a paragraph of this modality cannot be written without.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Modality::Functional => &["RepetitionTime"],
            Modality::Anatomical | Modality::Diffusion => &[],
            Modality::FieldMap => &["PhaseEncodingDirection"],
        }
    }
}
