use folio_core::{
    bloom_from, bucket_hue, hsl_to_rgb, prism_hues, rasterize_glow, SizeClass, SpriteKey,
    SpriteTable, BLOOM_SCALE, HUE_BUCKETS,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn prism_partners_are_offset_by_32_and_72() {
    let mut rng = StdRng::seed_from_u64(360);
    let mut hues: Vec<f32> = (0..360).map(|h| h as f32).collect();
    hues.extend((0..500).map(|_| rng.gen_range(0.0..360.0f32)));
    for h in hues {
        let [a, b, c] = prism_hues(h);
        assert!(close(a, h));
        assert!(close(b, (h + 32.0) % 360.0), "h={h} b={b}");
        assert!(close(c, (h + 72.0) % 360.0), "h={h} c={c}");
        assert!((0.0..360.0).contains(&b) && (0.0..360.0).contains(&c));
    }
}

#[test]
fn bucket_hues_round_to_whole_degrees() {
    assert_eq!(bucket_hue(0, 48), 0.0);
    assert_eq!(bucket_hue(1, 48), 8.0);
    assert_eq!(bucket_hue(24, 48), 180.0);
    assert_eq!(bucket_hue(47, 48), 353.0);
}

#[test]
fn hsl_primaries() {
    let red = hsl_to_rgb(0.0, 1.0, 0.5);
    let green = hsl_to_rgb(120.0, 1.0, 0.5);
    let blue = hsl_to_rgb(240.0, 1.0, 0.5);
    assert!(close(red[0], 1.0) && close(red[1], 0.0) && close(red[2], 0.0));
    assert!(close(green[0], 0.0) && close(green[1], 1.0) && close(green[2], 0.0));
    assert!(close(blue[0], 0.0) && close(blue[1], 0.0) && close(blue[2], 1.0));
    let white = hsl_to_rgb(200.0, 1.0, 1.0);
    assert!(white.iter().all(|c| close(*c, 1.0)));
}

#[test]
fn glow_is_deterministic() {
    assert_eq!(rasterize_glow(120.0, 13, 1.2), rasterize_glow(120.0, 13, 1.2));
}

#[test]
fn glow_has_opaque_core_and_clear_corners() {
    let img = rasterize_glow(200.0, 13, 1.2);
    assert_eq!(img.size, 13);
    assert_eq!(img.pixels.len(), 169);
    assert!(img.pixel(6, 6)[3] >= 254, "core alpha {:?}", img.pixel(6, 6));
    for (x, y) in [(0, 0), (12, 0), (0, 12), (12, 12)] {
        assert_eq!(img.pixel(x, y)[3], 0, "corner ({x},{y}) not clear");
    }
}

#[test]
fn glow_fades_outward_along_the_diagonal() {
    let img = rasterize_glow(40.0, 21, 1.5);
    let centre = img.pixel(10, 10)[3];
    let mid = img.pixel(13, 13)[3];
    let edge = img.pixel(16, 16)[3];
    assert!(centre > mid && mid > edge, "{centre} {mid} {edge}");
}

#[test]
fn rays_reach_further_than_the_diagonal_glow() {
    let img = rasterize_glow(300.0, 20, 1.0);
    // 0.24 * 20 = 4.8 px half-length; the diagonal at the same distance is dimmer
    let on_ray = img.pixel(10, 6)[3];
    let off_ray = img.pixel(13, 7)[3];
    assert!(on_ray > off_ray, "ray {on_ray} vs diagonal {off_ray}");
}

#[test]
fn bloom_upscales_and_softens() {
    let base = rasterize_glow(90.0, 20, 1.5);
    let bloom = bloom_from(&base, BLOOM_SCALE);
    assert_eq!(bloom.size, 32);
    assert_eq!(bloom.as_bytes().len(), 32 * 32 * 4);
    let peak = bloom.pixels.iter().map(|p| p[3]).max().unwrap_or(0);
    assert!(peak > 0 && peak < base.pixel(10, 10)[3]);
}

#[test]
fn table_covers_every_bucket_and_size() {
    let table = SpriteTable::build(HUE_BUCKETS, [8, 13, 20], [1.0, 1.2, 1.5], BLOOM_SCALE);
    assert_eq!(table.shape(), (HUE_BUCKETS, 3));
    assert_eq!(table.iter().count(), table.flat_len());

    let mut seen = HashSet::new();
    for (key, img) in table.iter() {
        let idx = key.flat_index(table.hue_buckets());
        assert!(idx < table.flat_len());
        assert!(seen.insert(idx), "duplicate slot {idx}");
        assert_eq!(table.get(key), Some(img));
    }

    let large = table.get(SpriteKey::base(5, SizeClass::Large)).map(|i| i.size);
    let large_bloom = table.get(SpriteKey::bloom(5, SizeClass::Large)).map(|i| i.size);
    assert_eq!(large, Some(20));
    assert_eq!(large_bloom, Some(32));
    assert!(table.get(SpriteKey::base(HUE_BUCKETS, SizeClass::Small)).is_none());
}

#[test]
fn size_class_picks_follow_cut_points() {
    let cuts = [0.55, 0.85];
    assert_eq!(SizeClass::from_pick(0.0, cuts), SizeClass::Small);
    assert_eq!(SizeClass::from_pick(0.55, cuts), SizeClass::Medium);
    assert_eq!(SizeClass::from_pick(0.849, cuts), SizeClass::Medium);
    assert_eq!(SizeClass::from_pick(0.85, cuts), SizeClass::Large);
}
