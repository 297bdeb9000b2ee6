use std::fmt;

use serde::{Deserialize, Serialize};

/// Class reported by the mask detector.
///
/// Ids 0, 1 and 2 follow the detector's label order; anything else is
/// folded into [`MaskClass::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskClass {
    WithMask,
    WithoutMask,
    #[serde(rename = "mask_weared_incorrect")]
    IncorrectMask,
    #[default]
    Unknown,
}

struct ClassInfo {
    label: &'static str,
    /// BGR, the order frame buffers are drawn in.
    color: [u8; 3],
}

const CLASS_TABLE: [ClassInfo; 4] = [
    ClassInfo {
        label: "with_mask",
        color: [0, 255, 0],
    },
    ClassInfo {
        label: "without_mask",
        color: [0, 0, 255],
    },
    ClassInfo {
        label: "mask_weared_incorrect",
        color: [0, 165, 255],
    },
    ClassInfo {
        label: "unknown",
        color: [128, 128, 128],
    },
];

impl MaskClass {
    /// Classes the detector can actually emit, in id order.
    pub const KNOWN: [MaskClass; 3] = [
        MaskClass::WithMask,
        MaskClass::WithoutMask,
        MaskClass::IncorrectMask,
    ];

    pub const ALL: [MaskClass; 4] = [
        MaskClass::WithMask,
        MaskClass::WithoutMask,
        MaskClass::IncorrectMask,
        MaskClass::Unknown,
    ];

    pub fn from_id(id: i64) -> Self {
        match id {
            0 => MaskClass::WithMask,
            1 => MaskClass::WithoutMask,
            2 => MaskClass::IncorrectMask,
            _ => MaskClass::Unknown,
        }
    }

    /// Detector class id, `None` for [`MaskClass::Unknown`].
    pub fn id(self) -> Option<u8> {
        match self {
            MaskClass::WithMask => Some(0),
            MaskClass::WithoutMask => Some(1),
            MaskClass::IncorrectMask => Some(2),
            MaskClass::Unknown => None,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        CLASS_TABLE[self.index()].label
    }

    /// Display colour in BGR order.
    pub fn color(self) -> [u8; 3] {
        CLASS_TABLE[self.index()].color
    }
}

impl fmt::Display for MaskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
