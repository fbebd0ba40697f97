//! Named icon slots, in sprite sheet order.
//!
//! Cell `n` of the sheet becomes `catalog[n]`. A slot with a guard is only
//! compiled into the firmware when that preprocessor symbol is defined.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSlot {
    pub name: &'static str,
    pub guard: Option<&'static str>,
}

impl IconSlot {
    const fn always(name: &'static str) -> Self {
        Self { name, guard: None }
    }

    const fn guarded(name: &'static str, guard: &'static str) -> Self {
        Self {
            name,
            guard: Some(guard),
        }
    }
}

/// Catalog used by the rounding converter.
pub const FULL_CATALOG: &[IconSlot] = &[
    IconSlot::always("ICON_FOLDER"),
    IconSlot::always("ICON_BINFILE"),
    IconSlot::always("ICON_UPDFILE"),
    IconSlot::always("ICON_GBCART"),
    IconSlot::always("ICON_GBCCART"),
    IconSlot::always("ICON_GBACART"),
    IconSlot::always("ICON_SMSCART"),
    IconSlot::always("ICON_NESCART"),
    IconSlot::always("ICON_RECENT"),
    IconSlot::always("ICON_DISK"),
    IconSlot::guarded("ICON_FLASH", "SUPPORT_NORGAMES"),
    IconSlot::always("ICON_SETTINGS"),
    IconSlot::always("ICON_UILANG_SETTINGS"),
    IconSlot::always("ICON_TOOLS"),
    IconSlot::always("ICON_INFO"),
    IconSlot::always("ICON_HFOLDER"),
    IconSlot::always("ICON_HFILE"),
];

/// Catalog used for pre-quantized sheets: no hidden folder/file icons.
pub const SHORT_CATALOG: &[IconSlot] = FULL_CATALOG.split_at(15).0;
