//! End-to-end conversion of PNG sheets written to disk.

use std::path::PathBuf;

use romfw_icon::error::IconError;
use romfw_icon::{ConvertMode, convert_file};

fn write_rgba_png(name: &str, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("romfw-icon-{}-{name}.png", std::process::id()));
    let file = std::fs::File::create(&path)?;
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(path)
}

/// Cell `n` is filled with a color whose red channel encodes `n`.
fn cell_sheet(cells: u32) -> Vec<u8> {
    let width = cells * 16;
    let mut rgba = Vec::with_capacity((width * 16 * 4) as usize);
    for _y in 0..16 {
        for x in 0..width {
            let cell = (x / 16) as u8;
            rgba.extend_from_slice(&[cell * 8, 0x40, 0x80, 0xFF]);
        }
    }
    rgba
}

/// Parse the `icons_img` body back into flat index lists, one per cell.
fn cell_indices(text: &str) -> Vec<Vec<u8>> {
    let body = text
        .split("icons_img[][4][8][8] = {\n")
        .nth(1)
        .and_then(|rest| rest.split("\n};\n").next())
        .expect("icons_img block present");

    let mut cells = Vec::new();
    let mut current = Vec::new();
    for line in body.lines() {
        match line {
            "  {" => current = Vec::new(),
            "  }," => cells.push(std::mem::take(&mut current)),
            l if l.starts_with("     {") => {
                let inner = l.trim().trim_start_matches('{').trim_end_matches("},");
                current.extend(
                    inner
                        .split(',')
                        .map(|v| u8::from_str_radix(v.trim_start_matches("0x"), 16).unwrap()),
                );
            }
            _ => {}
        }
    }
    cells
}

#[test]
fn full_sheet_round_trip() -> anyhow::Result<()> {
    let path = write_rgba_png("full", 17 * 16, 16, &cell_sheet(17))?;
    let text = convert_file(&path, ConvertMode::Rounded)?;
    std::fs::remove_file(&path)?;

    assert_eq!(text.matches(" ICON_").count(), 17);
    assert!(text.contains("#ifdef SUPPORT_NORGAMES\n ICON_FLASH,\n#endif\n"));
    // Guarded in the enum and around cell 10 of the image array.
    assert_eq!(text.matches("#ifdef SUPPORT_NORGAMES").count(), 2);

    let cells = cell_indices(&text);
    assert_eq!(cells.len(), 17);
    for (n, cell) in cells.iter().enumerate() {
        assert_eq!(cell.len(), 4 * 8 * 8);
        // One color per cell, sorted by red, so cell n uses index n + 1.
        assert!(cell.iter().all(|&i| i as usize == n + 1), "cell {n}");
    }
    assert!(text.contains("const uint16_t icons_pal[18] = {\n  0x0000,0x4100,0x4101,"));
    Ok(())
}

#[test]
fn alpha_threshold_from_png() -> anyhow::Result<()> {
    let mut rgba = vec![0u8; 16 * 16 * 4];
    for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
        let alpha = if i % 2 == 0 { 129 } else { 128 };
        px.copy_from_slice(&[0x21, 0x42, 0x63, alpha]);
    }
    let path = write_rgba_png("alpha", 16, 16, &rgba)?;
    let text = convert_file(&path, ConvertMode::Rounded)?;
    std::fs::remove_file(&path)?;

    // 0x21 -> 0x20, 0x42 -> 0x40, 0x63 -> 0x60.
    assert!(text.contains("icons_pal[2] = {\n  0x0000,0x3104\n};"));
    let cells = cell_indices(&text);
    assert!(cells[0].chunks(2).all(|pair| pair == [1, 0]));
    Ok(())
}

#[test]
fn too_many_cells_fails_without_output() -> anyhow::Result<()> {
    let path = write_rgba_png("wide", 18 * 16, 16, &cell_sheet(18))?;
    let result = convert_file(&path, ConvertMode::Rounded);
    std::fs::remove_file(&path)?;

    assert!(matches!(
        result,
        Err(IconError::CatalogMismatch {
            cells: 18,
            slots: 17
        })
    ));
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("romfw-icon-does-not-exist.png");
    let result = convert_file(&path, ConvertMode::Rounded);
    assert!(matches!(result, Err(IconError::Io(_))));
}
