use blusc::blosc::btune::{self, BLOSC_BTUNE};
use blusc::blosc::btune_types::{CompMode, Config};
use blusc::blosc::context::{Blosc2Context, Blosc2Filter};
use blusc::internal;

fn fresh_context(compcode: u8, clevel: i32, typesize: i32, sourcesize: i32) -> Blosc2Context {
    Blosc2Context {
        src: std::ptr::null(),
        dest: std::ptr::null_mut(),
        header_flags: 0,
        blosc2_flags: 0,
        sourcesize,
        header_overhead: 0,
        nblocks: 0,
        leftover: 0,
        blocksize: 0,
        splitmode: 1,
        output_bytes: 0,
        srcsize: 0,
        destsize: 0,
        typesize,
        bstarts: std::ptr::null_mut(),
        special_type: 0,
        compcode: compcode as i32,
        compcode_meta: 0,
        clevel,
        use_dict: 0,
        dict_buffer: std::ptr::null_mut(),
        dict_size: 0,
        dict_cdict: std::ptr::null_mut(),
        dict_ddict: std::ptr::null_mut(),
        filter_flags: 1,
        filters: [1, 0, 0, 0, 0, 0],
        filters_meta: [0; 6],
        urfilters: [Blosc2Filter { _placeholder: 0 }; 4],
        prefilter: std::ptr::null_mut(),
        postfilter: std::ptr::null_mut(),
        preparams: std::ptr::null_mut(),
        postparams: std::ptr::null_mut(),
        block_maskout: std::ptr::null_mut(),
        block_maskout_nitems: 0,
        schunk: std::ptr::null_mut(),
        serial_context: std::ptr::null_mut(),
        do_compress: 1,
        tuner_params: std::ptr::null_mut(),
        tuner_id: 0,
        codec_params: std::ptr::null_mut(),
        filter_params: [std::ptr::null_mut(); 6],
        nthreads: 2,
        new_nthreads: 2,
        threads_started: 0,
        end_threads: 0,
        threads: std::ptr::null_mut(),
        thread_contexts: std::ptr::null_mut(),
        thread_giveup_code: 0,
        thread_nblock: 0,
        dref_not_init: 0,
    }
}

/// S1: across a run of successive chunks with steadily decreasing
/// compression times, the tuner keeps adopting the faster candidate and
/// eventually reaches a terminal (Stop or Waiting) state rather than
/// cycling forever.
#[test]
fn repeated_updates_drive_the_tuner_to_a_terminal_state() {
    let mut cctx = fresh_context(1, 5, 4, 1 << 16);
    assert_eq!(
        btune::btune_init(Config::default(), &mut cctx, None),
        0
    );
    assert_eq!(cctx.tuner_id, BLOSC_BTUNE);

    let mut ctime = 1.0;
    for _ in 0..500 {
        btune::btune_next_cparams(&mut cctx);
        cctx.destsize = 1 << 15;
        btune::btune_update(&mut cctx, ctime);
        ctime *= 0.9;
    }

    // Whatever state it landed in, clevel must stay inside its legal range
    // and the context must still describe a compressor blusc can run.
    assert!(cctx.clevel >= 1 && cctx.clevel <= 9);
    btune::btune_free(&mut cctx);
}

/// S2: with `cparams_hint` set, the tuner seeds its best candidate from
/// whatever was already on the context instead of the codec list default.
#[test]
fn cparams_hint_seeds_best_from_the_live_context() {
    let mut cctx = fresh_context(5, 7, 8, 1 << 16); // ZSTD, clevel 7
    let mut config = Config::default();
    config.cparams_hint = true;
    btune::btune_init(config, &mut cctx, None);
    assert_eq!(cctx.compcode, 5);
    assert_eq!(cctx.clevel, 7);
    btune::btune_free(&mut cctx);
}

/// S3: in HCR mode, the tuner only ever rotates through ZSTD/ZLIB, never
/// the fast codecs used by the other modes.
#[test]
fn hcr_mode_only_ever_proposes_hcr_codecs() {
    let mut cctx = fresh_context(5, 5, 4, 1 << 16);
    let mut config = Config::default();
    config.comp_mode = CompMode::Hcr;
    btune::btune_init(config, &mut cctx, None);
    assert_eq!(
        btune::tuner_best_clevel(&cctx),
        8,
        "HCR mode must seed best.clevel at 8 before any candidate is tried"
    );

    for _ in 0..40 {
        btune::btune_next_cparams(&mut cctx);
        assert!(
            cctx.compcode == 5 || cctx.compcode == 4,
            "HCR mode proposed an unexpected codec: {}",
            cctx.compcode
        );
        assert!(
            cctx.clevel <= 6,
            "HCR mode must never emit clevel > 6, got {}",
            cctx.clevel
        );
        cctx.destsize = 1 << 15;
        btune::btune_update(&mut cctx, 0.05);
    }
    btune::btune_free(&mut cctx);
}

/// S4: with the default disabled axes, thread count and shuffle size never
/// drift away from their seeded value across many candidate cycles.
#[test]
fn disabled_axes_stay_put_across_many_cycles() {
    let mut cctx = fresh_context(1, 5, 4, 1 << 16);
    btune::btune_init(Config::default(), &mut cctx, None);
    let seeded_threads = cctx.nthreads;

    for _ in 0..100 {
        btune::btune_next_cparams(&mut cctx);
        cctx.destsize = 1 << 15;
        btune::btune_update(&mut cctx, 0.03);
    }
    assert_eq!(cctx.nthreads, seeded_threads);
    btune::btune_free(&mut cctx);
}

/// S6: a tuned candidate is a real, usable set of compression parameters —
/// round tripping data through the actual compressor/decompressor with the
/// winning codec/filter/clevel must succeed.
#[test]
fn tuned_candidate_round_trips_through_the_real_compressor() {
    let mut cctx = fresh_context(1, 5, 4, 65536);
    btune::btune_init(Config::default(), &mut cctx, None);
    btune::btune_next_cparams(&mut cctx);

    let src: Vec<u8> = (0..65536u32).map(|i| (i % 251) as u8).collect();
    let mut compressed = vec![0u8; src.len() + 256];
    let filters = [cctx.filters[0], 0, 0, 0, 0, 0];
    let filters_meta = [0u8; 6];
    let csize = internal::compress_extended(
        cctx.clevel,
        if cctx.filters[0] != 0 { 1 } else { 0 },
        cctx.typesize as usize,
        &src,
        &mut compressed,
        cctx.compcode as u8,
        &filters,
        &filters_meta,
    )
    .expect("compression should succeed for a well-formed candidate");

    cctx.destsize = csize as i32;
    btune::btune_update(&mut cctx, 0.01);

    let mut decompressed = vec![0u8; src.len()];
    let dsize = internal::decompress(&compressed[..csize], &mut decompressed)
        .expect("decompression should succeed");
    assert_eq!(dsize, src.len());
    assert_eq!(decompressed, src);

    btune::btune_free(&mut cctx);
}
