use blusc::blosc::entropy_probe;
use blusc::codecs::entropy_probe as entropy_probe_codec;

#[test]
fn compressible_data_scores_a_higher_cratio_than_random_data() {
    let mut repetitive = vec![0u8; 8192];
    for (i, b) in repetitive.iter_mut().enumerate() {
        *b = (i % 4) as u8;
    }

    let mut scattered = vec![0u8; 8192];
    let mut seed: u32 = 0x12345678;
    for b in scattered.iter_mut() {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        *b = (seed >> 16) as u8;
    }

    let repetitive_cratio = entropy_probe::get_cratio(&repetitive, repetitive.len(), 3, 3);
    let scattered_cratio = entropy_probe::get_cratio(&scattered, scattered.len(), 3, 3);

    assert!(
        repetitive_cratio > scattered_cratio,
        "expected repetitive data ({repetitive_cratio}) to out-compress scattered data ({scattered_cratio})"
    );
}

#[test]
fn tiny_buffer_is_treated_as_incompressible_rather_than_panicking() {
    let tiny = [1u8, 2, 3];
    let cratio = entropy_probe::get_cratio(&tiny, tiny.len(), 3, 3);
    assert_eq!(cratio, 1.0);
}

#[test]
fn estimate_cbytes_never_exceeds_the_input_length() {
    let data = vec![7u8; 4096];
    let cratio = entropy_probe::get_cratio(&data, data.len(), 3, 3);
    let estimate = entropy_probe::estimate_cbytes(data.len(), cratio);
    assert!(estimate <= data.len());
}

#[test]
fn probe_block_reports_a_positive_speed() {
    let data = vec![9u8; 2048];
    let instr = entropy_probe::probe_block(&data);
    assert!(instr.cspeed > 0.0);
    assert!(instr.cratio > 0.0);
}

#[test]
fn repeating_triplet_pattern_compresses_at_least_two_to_one() {
    let mut buf = vec![0u8; 4096];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = (i % 3) as u8;
    }
    let cratio = entropy_probe::get_cratio(&buf, 4096, 3, 3);
    assert!(cratio >= 2.0, "expected cratio >= 2.0, got {cratio}");
}

#[test]
fn codec_registration_is_idempotent() {
    entropy_probe_codec::register();
    entropy_probe_codec::register();
    let data = vec![3u8; 1024];
    let estimate = entropy_probe_codec::estimate_cbytes(&data);
    assert!(estimate > 0);
    assert!(estimate <= data.len());
}
