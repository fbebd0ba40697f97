//! C source emission.
//!
//! Produces three declarations, in order: an anonymous `enum` naming every
//! catalog slot, `icons_img` holding one `[4][8][8]` block of palette indices
//! per sheet cell, and `icons_pal` holding the BGR555 palette behind a
//! transparent `0x0000` sentinel. Guarded slots are wrapped in `#ifdef` in both
//! the enum and the image array.

use std::fmt::{self, Write};

use crate::catalog::IconSlot;
use crate::error::IconError;
use crate::palette::Palette;
use crate::sheet::{SpriteSheet, TILES_PER_CELL};

pub struct IconSource<'a> {
    sheet: &'a SpriteSheet,
    palette: &'a Palette,
    catalog: &'a [IconSlot],
}

impl<'a> IconSource<'a> {
    /// Pair a sheet with its palette and catalog. Fails if the sheet has more
    /// cells than the catalog has names.
    pub fn new(
        sheet: &'a SpriteSheet,
        palette: &'a Palette,
        catalog: &'a [IconSlot],
    ) -> Result<Self, IconError> {
        let cells = sheet.cell_count();
        if cells > catalog.len() {
            return Err(IconError::CatalogMismatch {
                cells,
                slots: catalog.len(),
            });
        }
        Ok(Self {
            sheet,
            palette,
            catalog,
        })
    }

    /// Render the complete fragment into memory.
    pub fn render(&self) -> Result<String, IconError> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.write_enum(out)?;
        self.write_images(out)?;
        self.write_palette(out)
    }

    fn write_enum<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "enum {{")?;
        for slot in self.catalog {
            guarded(out, slot.guard, |out| writeln!(out, " {},", slot.name))?;
        }
        writeln!(out, "}};")
    }

    fn write_images<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "const uint8_t icons_img[][4][8][8] = {{")?;
        for (cell, slot) in self.catalog.iter().enumerate().take(self.sheet.cell_count()) {
            guarded(out, slot.guard, |out| self.write_cell(out, cell))?;
        }
        writeln!(out, "}};")
    }

    fn write_cell<W: Write>(&self, out: &mut W, cell: usize) -> fmt::Result {
        writeln!(out, "  {{")?;
        for index in 0..TILES_PER_CELL {
            writeln!(out, "    {{")?;
            for row in self.sheet.tile(cell, index) {
                write!(out, "     {{")?;
                for (col, px) in row.into_iter().enumerate() {
                    if col > 0 {
                        out.write_char(',')?;
                    }
                    write!(out, "0x{:02x}", self.palette.index_of(px))?;
                }
                writeln!(out, "}},")?;
            }
            writeln!(out, "    }},")?;
        }
        writeln!(out, "  }},")
    }

    fn write_palette<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "const uint16_t icons_pal[{}] = {{", self.palette.len() + 1)?;
        write!(out, "  0x0000,")?;
        for (i, packed) in self.palette.packed().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            write!(out, "0x{packed:04x}")?;
        }
        writeln!(out)?;
        writeln!(out, "}};")
    }
}

fn guarded<W: Write>(
    out: &mut W,
    guard: Option<&str>,
    body: impl FnOnce(&mut W) -> fmt::Result,
) -> fmt::Result {
    if let Some(symbol) = guard {
        writeln!(out, "#ifdef {symbol}")?;
    }
    body(out)?;
    if guard.is_some() {
        writeln!(out, "#endif")?;
    }
    Ok(())
}
