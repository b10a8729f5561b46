use gba::{
    color::Color,
    mmio::Region,
    video::{attr, oam::OAM, palette::BG_PALETTE},
};

#[test]
fn rgb5_places_channels_blue_high() {
    for r in 0..32 {
        for g in 0..32 {
            for b in 0..32 {
                let c = Color::rgb5(r, g, b);
                assert_eq!(c.0 as u32, (b << 10) | (g << 5) | r);
                assert_eq!(c.0 & 0x8000, 0);
            }
        }
    }
}

#[test]
fn rgb8_drops_the_low_three_bits() {
    assert_eq!(Color::rgb8(255, 255, 255), Color::WHITE);
    assert_eq!(Color::rgb8(7, 7, 7), Color::BLACK);
    assert_eq!(Color::rgb8(0x80, 0x40, 0x08), Color::rgb5(16, 8, 1));
}

#[test]
fn attribute_words_compose_from_packers() {
    let attr0 = attr::pack_obj_y(150) | attr::ATTR0_COLOR_256 | attr::ATTR0_WIDE;
    assert_eq!(attr::obj_y_of(attr0), 150);
    assert_eq!(attr0 & 0xFF00, attr::ATTR0_COLOR_256 | attr::ATTR0_WIDE);

    let attr1 = attr::pack_obj_x(511) | attr::pack_rot_data(31) | attr::ATTR1_SIZE_64;
    assert_eq!(attr::obj_x_of(attr1), 511);
    assert_eq!(attr::rot_data_of(attr1), 31);

    let attr2 = attr::pack_tile(1023) | attr::pack_priority(3) | attr::pack_palette(15);
    assert_eq!(attr2, 0xFFFF);
    assert_eq!(attr::tile_of(attr2), 1023);
}

#[test]
fn region_views_match_the_memory_map() {
    assert_eq!(BG_PALETTE.addr(255), 0x0500_01FE);
    assert_eq!(OAM.addr(127), 0x0700_03F8);
    assert_eq!(OAM.end(), 0x0700_0400);

    let table = Region::new("scratch", 0x0300_0000, 4, 8);
    assert!(table.try_addr(7).is_ok());
    assert_eq!(
        table.try_addr(8),
        Err(gba::Error::IndexOutOfRange { region: "scratch", index: 8, len: 8 })
    );
}
