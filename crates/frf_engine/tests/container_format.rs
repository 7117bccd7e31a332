use frf_engine::{FrfError, FrfFont, PbmImage, decode, encode};
use pretty_assertions::assert_eq;

/// Build a P4 image from packed row bytes.
fn pbm(width: usize, height: usize, data: &[u8]) -> PbmImage {
    let mut bytes = format!("P4\n{width} {height}\n").into_bytes();
    bytes.extend_from_slice(data);
    PbmImage::from_bytes(&bytes).unwrap()
}

/// An 8-tile source: 32x4 pixels, 8x2 cells, recognizable per-tile rows.
fn eight_tile_image() -> PbmImage {
    let data: Vec<u8> = (1..=16).collect();
    pbm(32, 4, &data)
}

#[test]
fn roundtrip_monospaced() {
    let img = eight_tile_image();
    let (font, notices) = FrfFont::build(&img, 8, 2, Some("20 41 42 61 62 30 31 AC"), None).unwrap();
    assert!(notices.is_empty());

    let decoded = decode(&encode(&font)).unwrap();
    assert_eq!(decoded.cell_width(), 8);
    assert_eq!(decoded.cell_height(), 2);
    assert_eq!(decoded.line_height(), 2);
    assert!(!decoded.is_proportional());
    assert_eq!(decoded.len(), font.len());

    for glyph in font.glyphs() {
        let back = decoded.glyph_at(glyph.codepoint).expect("glyph lost in round trip");
        assert_eq!(back.width, 8, "no width table: widths must fall back to cell width");
        for y in 0..2 {
            assert_eq!(back.row(y), glyph.row(y));
        }
    }
}

#[test]
fn roundtrip_proportional() {
    let img = eight_tile_image();
    let (font, _) = FrfFont::build(&img, 8, 2, Some("20 41 42 61 62 30 31 AC"), Some("3 8 7 6 5 4 4 8")).unwrap();

    let decoded = decode(&encode(&font)).unwrap();
    assert!(decoded.is_proportional());
    for glyph in font.glyphs() {
        let back = decoded.glyph_at(glyph.codepoint).unwrap();
        assert_eq!(back.width, glyph.width);
        for y in 0..2 {
            assert_eq!(back.row(y), glyph.row(y));
        }
    }
}

#[test]
fn every_section_is_four_byte_aligned() {
    // Odd counts and heights exercise every padding amount.
    for (cols, height, map) in [(1, 1, "41"), (3, 3, "41 42 43"), (5, 2, "41 42 43 44 45")] {
        let width_px = cols * 8;
        let data = vec![0x5Au8; cols * height];
        let img = pbm(width_px, height, &data);
        let (font, _) = FrfFont::build(&img, 8, height as u8, Some(map), None).unwrap();
        let bytes = encode(&font);

        assert_eq!(bytes.len() % 4, 0, "container must end on a 4 byte boundary");
        let total = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        assert_eq!(total, bytes.len() - 8, "totalSize must be exact");

        // Walk the declared section sizes; each must be a multiple of 4
        // and they must land exactly on EOF.
        let mut pos = 8;
        while pos < bytes.len() {
            let size = u32::from_le_bytes(bytes[pos + 4..pos + 8].try_into().unwrap()) as usize;
            assert_eq!(size % 4, 0, "declared size includes padding");
            pos += 8 + size;
        }
        assert_eq!(pos, bytes.len());
    }
}

#[test]
fn single_1x1_glyph_boundary() {
    let img = pbm(1, 1, &[0x80]);
    let (font, _) = FrfFont::build(&img, 1, 1, Some("2A"), None).unwrap();
    let bytes = encode(&font);
    assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize, bytes.len() - 8);

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.len(), 1);
    let glyph = decoded.glyph('*').unwrap();
    assert_eq!(glyph.row(0), 0x80);
    assert_eq!(glyph.width, 1);
}

#[test]
fn map_truncation_vs_overflow() {
    let img = eight_tile_image();

    let (font, notices) = FrfFont::build(&img, 8, 2, Some("41 42 43 44 45"), None).unwrap();
    assert_eq!(font.len(), 5);
    assert_eq!(notices.len(), 1);

    let err = FrfFont::build(&img, 8, 2, Some("41 42 43 44 45 46 47 48 49"), None).unwrap_err();
    assert!(matches!(err, FrfError::MapTooLarge { entries: 9, capacity: 8 }));
}

#[test]
fn straddled_tile_survives_roundtrip() {
    // 5px cells in a 40px image: tile 6 sits at bit offset 30, row reads
    // straddle source bytes 3 and 4.
    let mut data = vec![0u8; 15];
    data[3] = 0b0000_0011;
    data[4] = 0b1010_0000;
    let img = pbm(40, 3, &data);
    let (font, _) = FrfFont::build(&img, 5, 3, Some("30 31 32 33 34 35 36 37"), None).unwrap();

    let decoded = decode(&encode(&font)).unwrap();
    let glyph = decoded.glyph('6').unwrap();
    assert_eq!(glyph.row(0), 0b1110_1000);
    assert_eq!(glyph.row(1), 0);
}

#[test]
fn duplicate_codepoints_collapse_to_last() {
    let img = pbm(16, 1, &[0xF0, 0x0F]);
    let (font, notices) = FrfFont::build(&img, 8, 1, Some("41 41"), None).unwrap();
    assert_eq!(font.len(), 1);
    assert!(notices.iter().any(|n| n.to_string().contains("1 duplicate")));

    let decoded = decode(&encode(&font)).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.glyph('A').unwrap().row(0), 0x0F);
}

#[test]
fn output_order_is_ascending_regardless_of_tile_order() {
    let img = pbm(32, 1, &[1, 2, 3, 4]);
    let (font, _) = FrfFont::build(&img, 8, 1, Some("44 41 43 42"), None).unwrap();
    let bytes = encode(&font);
    let decoded = decode(&bytes).unwrap();

    let cps: Vec<u16> = decoded.glyphs().iter().map(|g| g.codepoint).collect();
    assert_eq!(cps, vec![0x41, 0x42, 0x43, 0x44]);
    // Bitmaps stayed attached to their codepoints through the sort.
    assert_eq!(decoded.glyph_at(0x44).unwrap().row(0), 1);
    assert_eq!(decoded.glyph_at(0x41).unwrap().row(0), 2);
}

#[test]
fn truncation_after_meta_reports_missing_cdat() {
    let img = eight_tile_image();
    let (font, _) = FrfFont::build(&img, 8, 2, Some("41 42 43"), None).unwrap();
    let mut bytes = encode(&font);

    // Cut everything after the META section and fix up totalSize so the
    // size check passes and the section scan reaches the gap.
    bytes.truncate(20);
    let total = (bytes.len() - 8) as u32;
    bytes[4..8].copy_from_slice(&total.to_le_bytes());

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, FrfError::MissingSection { section: "CDAT" }), "got {err:?}");
}

#[test]
fn corrupt_total_size_fails_before_sections() {
    let img = eight_tile_image();
    let (font, _) = FrfFont::build(&img, 8, 2, Some("41 42 43"), None).unwrap();
    let mut bytes = encode(&font);
    bytes[4] ^= 0xFF;

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(err, FrfError::SizeMismatch { .. }), "got {err:?}");
}

#[test]
fn wrong_section_magic_is_terminal() {
    let img = eight_tile_image();
    let (font, _) = FrfFont::build(&img, 8, 2, Some("41 42 43"), None).unwrap();
    let mut bytes = encode(&font);

    // Corrupt the META magic.
    bytes[8] = b'X';
    assert!(matches!(decode(&bytes).unwrap_err(), FrfError::MissingSection { section: "META" }));
}

#[test]
fn cwth_absence_is_just_the_next_magic() {
    let img = pbm(16, 1, &[0xF0, 0x0F]);

    let (mono, _) = FrfFont::build(&img, 8, 1, Some("41 42"), None).unwrap();
    let bytes = encode(&mono);
    assert!(!bytes.windows(4).any(|w| w == b"CWTH"));

    let (prop, _) = FrfFont::build(&img, 8, 1, Some("41 42"), Some("4 6")).unwrap();
    let bytes = encode(&prop);
    assert!(bytes.windows(4).any(|w| w == b"CWTH"));
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.glyph('A').unwrap().width, 4);
    assert_eq!(decoded.glyph('B').unwrap().width, 6);
}

#[test]
fn identity_mapping_when_no_map_given() {
    let img = pbm(16, 1, &[0xF0, 0x0F]);
    let (font, notices) = FrfFont::build(&img, 8, 1, None, None).unwrap();
    assert_eq!(notices.len(), 1);

    let decoded = decode(&encode(&font)).unwrap();
    assert_eq!(decoded.glyph_at(0).unwrap().row(0), 0xF0);
    assert_eq!(decoded.glyph_at(1).unwrap().row(0), 0x0F);
}
