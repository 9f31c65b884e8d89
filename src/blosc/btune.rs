// Corresponds to c-blosc2/plugins/tuners/btune/btune.c (and .h)
//
// The adaptive tuner: starting from a small codec/filter/split candidate
// list, it walks a state machine that tries one axis of the compression
// parameters at a time (codec+filter, shuffle size, threads, clevel,
// blocksize, memcpy bypass), keeping whichever candidate scores best and
// discarding the rest, until it settles (STOP) or is told to keep
// readapting (REPEAT_SOFT / REPEAT_ALL).

use std::env;

use crate::blosc::btune_log;
use crate::blosc::btune_model;
use crate::blosc::btune_types::{Behaviour, CompMode, Config, Params, PerfMode, ReadaptType, RepeatMode, State};
use crate::blosc::context::{Blosc2Context, Blosc2Schunk};
use crate::blosc::entropy_probe;
use crate::include::blosc2_include::{
    BLOSC2_ERROR_SUCCESS, BLOSC2_ERROR_TUNER, BLOSC2_MAX_OVERHEAD, BLOSC_ALWAYS_SPLIT,
    BLOSC_BITSHUFFLE, BLOSC_BLOSCLZ, BLOSC_LZ4, BLOSC_LZ4HC, BLOSC_MIN_BUFFERSIZE,
    BLOSC_NEVER_SPLIT, BLOSC_NOFILTER, BLOSC_SHUFFLE, BLOSC_ZLIB, BLOSC_ZSTD, L1,
};

/// Tuner id this module registers under, reserved by `BLOSC_LAST_TUNER` in
/// the codec/filter/tuner id space.
pub const BLOSC_BTUNE: i32 = 1;

const MAX_CODECS: usize = 8;
const NUM_FILTERS: usize = 3;
const NUM_SPLITS: usize = 2;

const MAX_CLEVEL: i32 = 9;
const MIN_BLOCK: i32 = 16 * 1024;
const MAX_BLOCK: i32 = 2 * 1024 * 1024;
const MIN_BITSHUFFLE: i32 = 1;
const MIN_SHUFFLE: i32 = 2;
const MAX_SHUFFLE: i32 = 16;
const MIN_THREADS: i32 = 1;
const SOFT_STEP_SIZE: i32 = 1;
const HARD_STEP_SIZE: i32 = 2;
const MAX_STATE_THREADS: i32 = 50;

// Mirrors the reference's BTUNE_DISABLE_* compile-time flags: only
// CODEC_FILTER and CLEVEL are live readapt axes by default.
const BTUNE_DISABLE_SHUFFLESIZE: bool = true;
const BTUNE_DISABLE_BLOCKSIZE: bool = true;
const BTUNE_DISABLE_MEMCPY: bool = true;
const BTUNE_DISABLE_THREADS: bool = true;

const FILTERS: [u8; NUM_FILTERS] = [BLOSC_NOFILTER, BLOSC_SHUFFLE, BLOSC_BITSHUFFLE];

/// Whether `compcode` (with the current filter) behaves as a High
/// Compression Ratio codec: these get coarser, bigger blocks.
fn is_hcr(compcode: u8, filter: u8) -> bool {
    match compcode {
        x if x == BLOSC_BLOSCLZ => false,
        x if x == BLOSC_LZ4 => filter == BLOSC_BITSHUFFLE,
        x if x == BLOSC_LZ4HC => true,
        x if x == BLOSC_ZLIB => true,
        x if x == BLOSC_ZSTD => true,
        _ => false,
    }
}

fn btune_get_codecs(comp_mode: CompMode, perf_mode: PerfMode) -> Vec<u8> {
    let mut codecs = Vec::with_capacity(MAX_CODECS);
    if comp_mode == CompMode::Hcr {
        codecs.push(BLOSC_ZSTD);
        codecs.push(BLOSC_ZLIB);
        return codecs;
    }
    codecs.push(BLOSC_LZ4);
    if comp_mode == CompMode::Balanced {
        codecs.push(BLOSC_BLOSCLZ);
    }
    if perf_mode == PerfMode::Decomp {
        codecs.push(BLOSC_LZ4HC);
    }
    codecs
}

fn split_for_index(index: usize, compcode: u8) -> i32 {
    // BloscLZ compresses poorly when not split; always split it regardless
    // of which half of the rotation we landed on.
    if compcode == BLOSC_BLOSCLZ {
        return BLOSC_ALWAYS_SPLIT as i32;
    }
    if index % 2 == 0 {
        BLOSC_NEVER_SPLIT as i32
    } else {
        BLOSC_ALWAYS_SPLIT as i32
    }
}

/// One candidate (codec, filter, split) combination plus the per-codec
/// coordinate-descent state and cached measurements, reconstituted from the
/// opaque `tuner_params` pointer on every `Blosc2Context` call.
pub struct Tuner {
    pub config: Config,
    codecs: Vec<u8>,
    /// Linear index into the (codec, filter, split) rotation; `i / (F·2)`
    /// picks the codec, `(i % (F·2)) / 2` the filter, `i % 2` the split.
    aux_index: u32,
    /// Attempts made on the current readapt axis (CLEVEL/BLOCKSIZE/
    /// SHUFFLE_SIZE/THREADS) since it was entered; `<= 1` means this is the
    /// first candidate tried on the axis, which gets a flip-and-retry
    /// instead of an immediate exit on failure.
    axis_attempts: u32,

    pub best: Params,
    aux: Params,

    state: State,
    step_size: i32,
    readapt_from: ReadaptType,
    nwaitings: u32,
    nsofts: u32,
    nhards: u32,
    is_repeating: bool,
    steps_count: u64,

    current_scores: Vec<f64>,
    current_cratios: Vec<f64>,
    rep_index: usize,

    max_threads: i32,
    threads_for_comp: i32,
    nthreads_decomp: i32,

    inferred: bool,
    /// Set when entering CLEVEL off the back of a hard readapt; consumed by
    /// the next CLEVEL step to force `aux.blocksize = 0` so it gets
    /// recomputed from the §4.6 default heuristic.
    reset_blocksize_on_clevel: bool,
}

impl Tuner {
    fn new(config: Config, cctx: &Blosc2Context) -> Self {
        // A non-hint init always starts with a hard readapt; that forced
        // initial probe is absorbed into the hard budget.
        let mut config = config;
        if !config.cparams_hint {
            config.behaviour.nhards_before_stop += 1;
        }

        let mut codecs = btune_get_codecs(config.comp_mode, config.perf_mode);
        let max_threads = cctx.nthreads.max(1) as i32;

        let mut best = Params::default();
        if config.cparams_hint {
            best.compcode = cctx.compcode as u8;
            best.filter = cctx.filters[0];
            best.splitmode = cctx.splitmode;
            best.clevel = cctx.clevel;
            best.blocksize = cctx.blocksize;
            best.nthreads_comp = max_threads;
            if !codecs.contains(&best.compcode) {
                codecs.push(best.compcode);
            }
        } else {
            best.compcode = codecs[0];
            best.clevel = if config.comp_mode == CompMode::Hcr { 8 } else { 9 };
            best.nthreads_comp = max_threads;
        }
        best.nthreads_decomp = max_threads;

        Tuner {
            config,
            codecs,
            aux_index: 0,
            axis_attempts: 0,
            aux: best,
            best,
            state: State::CodecFilter,
            step_size: SOFT_STEP_SIZE,
            readapt_from: ReadaptType::Hard,
            nwaitings: 0,
            nsofts: 0,
            nhards: 0,
            is_repeating: false,
            steps_count: 0,
            current_scores: Vec::new(),
            current_cratios: Vec::new(),
            rep_index: 0,
            max_threads,
            threads_for_comp: max_threads,
            nthreads_decomp: max_threads,
            inferred: false,
            reset_blocksize_on_clevel: false,
        }
    }

    fn has_ended_codec_filter(&self) -> bool {
        self.aux_index as usize >= self.codecs.len() * NUM_FILTERS * NUM_SPLITS
    }

    /// Enforce spec.md §3's clevel invariants: BALANCED mode caps ZSTD/ZLIB
    /// at 3, HCR mode caps every codec at 6, and ZSTD at clevel 9 is always
    /// rewritten to 8. Applied to `aux` right before it is published.
    fn enforce_clevel_caps(&mut self) {
        if self.aux.compcode == BLOSC_ZSTD && self.aux.clevel == 9 {
            self.aux.clevel = 8;
        }
        match self.config.comp_mode {
            CompMode::Balanced => {
                if self.aux.compcode == BLOSC_ZSTD || self.aux.compcode == BLOSC_ZLIB {
                    self.aux.clevel = self.aux.clevel.min(3);
                }
            }
            CompMode::Hcr => {
                self.aux.clevel = self.aux.clevel.min(6);
            }
            CompMode::Hsp => {}
        }
    }

    fn has_ended_clevel(&self) -> bool {
        self.aux.clevel >= MAX_CLEVEL || self.aux.clevel <= 1
    }

    fn has_ended_blocksize(&self) -> bool {
        self.aux.blocksize >= MAX_BLOCK || self.aux.blocksize <= MIN_BLOCK
    }

    fn has_ended_shuffle(&self) -> bool {
        let min = if self.aux.filter == BLOSC_BITSHUFFLE {
            MIN_BITSHUFFLE
        } else {
            MIN_SHUFFLE
        };
        self.aux.shufflesize >= MAX_SHUFFLE || self.aux.shufflesize <= min
    }

    fn has_ended_threads(&self) -> bool {
        self.aux.nthreads_comp >= MAX_STATE_THREADS.min(self.max_threads)
            || self.aux.nthreads_comp <= MIN_THREADS
    }

    /// Advance the (codec, filter, split) rotation by one slot. Reads the
    /// triple at the current `aux_index` first, then increments, so the
    /// very first call yields `(codecs[0], filters[0], never_split)` and
    /// every one of the `|codecs|·|filters|·2` triples is visited exactly
    /// once per hard readapt.
    fn advance_codec_filter(&mut self) {
        let per_codec = NUM_FILTERS * NUM_SPLITS;
        let i = self.aux_index as usize;
        let codec_idx = (i / per_codec).min(self.codecs.len() - 1);
        let filter_idx = (i % per_codec) / NUM_SPLITS;
        let split_idx = i % NUM_SPLITS;

        self.aux.compcode = self.codecs[codec_idx];
        self.aux.filter = FILTERS[filter_idx];
        self.aux.splitmode = split_for_index(split_idx, self.aux.compcode);

        self.aux_index += 1;
    }

    fn init_soft(&mut self) {
        self.step_size = SOFT_STEP_SIZE;
        self.readapt_from = ReadaptType::Soft;
        self.aux = self.best;
        // A soft readapt only ever revisits CLEVEL (and BLOCKSIZE, when
        // enabled) — it never re-runs CODEC_FILTER/SHUFFLE_SIZE/THREADS.
        if self.has_ended_clevel() {
            self.aux.increasing_clevel = !self.aux.increasing_clevel;
        }
        self.state = State::Clevel;
        self.axis_attempts = 0;
    }

    fn init_hard(&mut self) {
        self.step_size = HARD_STEP_SIZE;
        self.readapt_from = ReadaptType::Hard;
        self.state = State::CodecFilter;
        self.aux = self.best;
        self.aux_index = 0;
        self.axis_attempts = 0;
    }

    fn init_without_hards(&mut self) {
        match self.config.behaviour.repeat_mode {
            RepeatMode::RepeatAll => self.init_hard(),
            RepeatMode::RepeatSoft => self.init_soft(),
            RepeatMode::Stop => {
                self.state = State::Stop;
            }
        }
    }

    /// Apply `self.aux`/`self.best` onto the live context ahead of the next
    /// compression call.
    fn publish(&self, cctx: &mut Blosc2Context) {
        let params = if self.state == State::Waiting || self.state == State::Stop {
            &self.best
        } else {
            &self.aux
        };
        cctx.compcode = params.compcode as i32;
        cctx.filters[0] = params.filter;
        cctx.filter_flags = if params.filter == BLOSC_NOFILTER { 0 } else { 1 };
        cctx.clevel = params.clevel;
        cctx.splitmode = params.splitmode;
        if params.blocksize > 0 {
            cctx.blocksize = params.blocksize;
        }
        cctx.nthreads = params.nthreads_comp.max(1) as i16;
    }

    fn score_function(&self, ctime: f64, dtime: f64, reduced_cbytes: f64) -> f64 {
        let bandwidth = self.config.bandwidth as f64;
        match self.config.perf_mode {
            PerfMode::Comp => ctime + reduced_cbytes / bandwidth,
            PerfMode::Decomp => reduced_cbytes / bandwidth + dtime,
            PerfMode::Balanced => ctime + reduced_cbytes / bandwidth + dtime,
        }
    }

    fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    fn has_improved(&self, mean_score: f64, mean_cratio: f64) -> bool {
        let score_coef = if mean_score > 0.0 {
            self.best.score / mean_score
        } else {
            1.0
        };
        let cratio_coef = if self.best.cratio > 0.0 {
            mean_cratio / self.best.cratio
        } else {
            1.0
        };
        let r = cratio_coef;
        let s = score_coef;
        match self.config.comp_mode {
            CompMode::Hsp => {
                (r > 1.0 && s > 1.0)
                    || (r > 0.5 && s > 2.0)
                    || (r > 0.67 && s > 1.3)
                    || (r > 2.0 && s > 0.7)
            }
            CompMode::Balanced => {
                (r > 1.0 && s > 1.0) || (r > 1.1 && s > 0.8) || (r > 1.3 && s > 0.5)
            }
            CompMode::Hcr => r > 1.0,
        }
    }

    /// Default blocksize heuristic, invoked whenever `aux.blocksize == 0`.
    /// Same clevel-scaled L1 table as `blosc::stune`'s own
    /// `blosc_stune_next_blocksize` (0: /4, 1: /2, 2: *1, 3: *2, 4-5: *4,
    /// 6-8: *8, 9: *8, *16 more for HCR codecs), since it is the exact
    /// heuristic btune falls back to when it is not itself varying
    /// blocksize.
    fn default_blocksize(&self, nbytes: i32, typesize: i32) -> i32 {
        if nbytes < typesize {
            return 1;
        }
        if self.aux.blocksize != 0 {
            return self.aux.blocksize.max(BLOSC_MIN_BUFFERSIZE as i32);
        }
        let hcr = is_hcr(self.aux.compcode, self.aux.filter);
        let clevel = self.aux.clevel;
        let mut blocksize = nbytes;
        if nbytes >= L1 as i32 {
            blocksize = L1 as i32;
            if hcr {
                blocksize *= 2;
            }
            blocksize = match clevel {
                0 => blocksize / 4,
                1 => blocksize / 2,
                2 => blocksize,
                3 => blocksize * 2,
                4 | 5 => blocksize * 4,
                6 | 7 | 8 => blocksize * 8,
                9 => blocksize * if hcr { 16 } else { 8 },
                _ => blocksize,
            };
        }
        if clevel > 0 {
            blocksize = blocksize.min(1 << 16);
            blocksize *= typesize.max(1);
            blocksize = blocksize.max(1 << 16);
        }
        if blocksize > nbytes {
            blocksize = nbytes;
        }
        if typesize > 0 && blocksize > typesize {
            blocksize = blocksize / typesize * typesize;
        }
        blocksize.max(typesize.max(1))
    }

    /// BLOCKSIZE state step: multiply/divide by `2^step_size`, bounded by
    /// `[MIN_BLOCK << (step_size-1), min(MAX_BLOCK >> (step_size-1),
    /// source_size)]`.
    fn step_blocksize(&self, nbytes: i32, typesize: i32) -> i32 {
        let shift = (self.step_size - 1).max(0);
        let lower = MIN_BLOCK << shift;
        let upper = (MAX_BLOCK >> shift).min(nbytes);
        let mut blocksize = self.aux.blocksize.max(MIN_BLOCK);
        if self.aux.increasing_block {
            blocksize <<= self.step_size;
        } else {
            blocksize >>= self.step_size;
        }
        blocksize = blocksize.clamp(lower, upper.max(lower));
        if typesize > 0 && blocksize > typesize {
            blocksize = blocksize / typesize * typesize;
        }
        blocksize.max(typesize.max(1))
    }
}

fn env_metadata_path(comp_mode: CompMode) -> Option<String> {
    let var = match comp_mode {
        CompMode::Hcr => "BTUNE_MODEL_HCR",
        CompMode::Hsp => "BTUNE_MODEL_HSP",
        CompMode::Balanced => "BTUNE_MODEL_BALANCED",
    };
    env::var(var).ok()
}

fn tuner_mut<'a>(cctx: &Blosc2Context) -> Option<&'a mut Tuner> {
    if cctx.tuner_params.is_null() {
        return None;
    }
    // SAFETY: tuner_params was populated by btune_init with a Box<Tuner>
    // cast through Box::into_raw; it is only ever read back through this
    // helper, and freed exactly once by btune_free.
    unsafe { Some(&mut *(cctx.tuner_params as *mut Tuner)) }
}

/// Initialize the btune tuner and install it on both the compression and
/// (when given) decompression contexts.
pub fn btune_init(config: Config, cctx: &mut Blosc2Context, dctx: Option<&mut Blosc2Context>) -> i32 {
    if !cctx.tuner_params.is_null() {
        return BLOSC2_ERROR_TUNER;
    }
    let tuner = Box::new(Tuner::new(config, cctx));
    let raw = Box::into_raw(tuner) as *mut u8;
    cctx.tuner_params = raw;
    cctx.tuner_id = BLOSC_BTUNE;
    if let Some(dctx) = dctx {
        dctx.tuner_params = raw;
        dctx.tuner_id = BLOSC_BTUNE;
    }
    if let Some(tuner) = tuner_mut(cctx) {
        tuner.publish(cctx);
    }
    BLOSC2_ERROR_SUCCESS
}

/// Read back the tuner's current `best.clevel`, for tests and diagnostics
/// that need to see the seeded candidate before any chunk has been scored.
pub fn tuner_best_clevel(cctx: &Blosc2Context) -> i32 {
    tuner_mut(cctx).map(|t| t.best.clevel).unwrap_or(-1)
}

/// Fill in `blocksize` when the caller left it at 0 (automatic).
pub fn btune_next_blocksize(cctx: &mut Blosc2Context) -> i32 {
    let nbytes = cctx.sourcesize;
    let typesize = cctx.typesize;
    if nbytes < typesize {
        cctx.blocksize = 1;
        return BLOSC2_ERROR_SUCCESS;
    }
    let Some(tuner) = tuner_mut(cctx) else {
        return BLOSC2_ERROR_TUNER;
    };
    if cctx.blocksize != 0 {
        return BLOSC2_ERROR_SUCCESS;
    }
    let blocksize = tuner.default_blocksize(nbytes, typesize);
    cctx.blocksize = blocksize;
    tuner.aux.blocksize = blocksize;
    tuner.best.blocksize = if tuner.best.blocksize == 0 {
        blocksize
    } else {
        tuner.best.blocksize
    };
    BLOSC2_ERROR_SUCCESS
}

fn schunk_nchunks(cctx: &Blosc2Context) -> i64 {
    if cctx.schunk.is_null() {
        return -1;
    }
    // SAFETY: schunk, when non-null, is owned by the caller for the
    // lifetime of the compression call and is never mutated concurrently
    // with this read.
    unsafe { (*cctx.schunk).nchunks }
}

/// Run first-chunk inference: probe the buffer with the entropy codec and
/// let the model vote on a (codec, filter) pair, collapsing the
/// CODEC_FILTER state's rotation down to that single winner.
fn try_first_chunk_inference(tuner: &mut Tuner, cctx: &Blosc2Context) {
    if tuner.inferred || tuner.state != State::CodecFilter {
        return;
    }
    if schunk_nchunks(cctx) != 0 {
        return;
    }
    if cctx.src.is_null() || cctx.sourcesize <= 0 {
        return;
    }
    let src =
        unsafe { std::slice::from_raw_parts(cctx.src, cctx.sourcesize as usize) };
    let path = env_metadata_path(tuner.config.comp_mode);
    let blocksize = if cctx.blocksize > 0 {
        cctx.blocksize as usize
    } else {
        entropy_probe::estimate_cbytes(src.len(), 1.0).max(1)
    };
    match btune_model::model_inference(path.as_deref(), src, blocksize) {
        Ok((compcode, filter)) => {
            tuner.aux.compcode = compcode as u8;
            tuner.aux.filter = filter;
            tuner.aux.splitmode = split_for_index(0, tuner.aux.compcode);
            tuner.inferred = true;
        }
        Err(err) => {
            btune_log::debug(&format!("inference skipped: {}", err));
        }
    }
}

/// Generate the next candidate `Params` to try, writing it onto the live
/// context.
pub fn btune_next_cparams(cctx: &mut Blosc2Context) -> i32 {
    let Some(tuner) = tuner_mut(cctx) else {
        return BLOSC2_ERROR_TUNER;
    };

    try_first_chunk_inference(tuner, cctx);

    match tuner.state {
        State::CodecFilter => {
            if !tuner.inferred {
                tuner.advance_codec_filter();
                // Slow, high-ratio codecs are probed at a cheap clevel
                // during the initial hard readapt when speed matters, so
                // the codec/filter/split sweep isn't dominated by their
                // cost.
                let slow_codec = tuner.aux.compcode == BLOSC_ZSTD || tuner.aux.compcode == BLOSC_ZLIB;
                let fast_perf = matches!(tuner.config.perf_mode, PerfMode::Comp | PerfMode::Balanced);
                if slow_codec && fast_perf && tuner.nhards == 0 {
                    tuner.aux.clevel = 3;
                }
            }
        }
        State::ShuffleSize => {
            tuner.axis_attempts += 1;
            if !BTUNE_DISABLE_SHUFFLESIZE {
                if tuner.aux.increasing_shuffle {
                    tuner.aux.shufflesize = (tuner.aux.shufflesize << tuner.step_size).min(MAX_SHUFFLE);
                } else {
                    tuner.aux.shufflesize = (tuner.aux.shufflesize >> tuner.step_size).max(MIN_SHUFFLE);
                }
            }
        }
        State::Threads => {
            tuner.axis_attempts += 1;
            if !BTUNE_DISABLE_THREADS {
                if tuner.aux.increasing_nthreads {
                    tuner.aux.nthreads_comp =
                        (tuner.aux.nthreads_comp + tuner.step_size).min(tuner.max_threads);
                } else {
                    tuner.aux.nthreads_comp =
                        (tuner.aux.nthreads_comp - tuner.step_size).max(MIN_THREADS);
                }
            }
        }
        State::Clevel => {
            tuner.axis_attempts += 1;
            if tuner.reset_blocksize_on_clevel {
                tuner.aux.blocksize = 0;
                tuner.reset_blocksize_on_clevel = false;
            }
            if tuner.aux.increasing_clevel {
                tuner.aux.clevel = (tuner.aux.clevel + tuner.step_size).min(MAX_CLEVEL);
            } else {
                tuner.aux.clevel = (tuner.aux.clevel - tuner.step_size).max(1);
            }
        }
        State::Blocksize => {
            tuner.axis_attempts += 1;
            if !BTUNE_DISABLE_BLOCKSIZE {
                let nbytes = cctx.sourcesize;
                let typesize = cctx.typesize;
                tuner.aux.blocksize = tuner.step_blocksize(nbytes, typesize);
            }
        }
        State::Memcpy => {
            if !BTUNE_DISABLE_MEMCPY {
                tuner.aux.clevel = 0;
            }
        }
        State::Waiting | State::Stop => {}
    }

    tuner.enforce_clevel_caps();
    tuner.publish(cctx);
    BLOSC2_ERROR_SUCCESS
}

fn update_aux(tuner: &mut Tuner, improved: bool) {
    match tuner.state {
        State::CodecFilter => {
            if tuner.inferred || tuner.has_ended_codec_filter() {
                tuner.axis_attempts = 0;
                tuner.state = if BTUNE_DISABLE_SHUFFLESIZE {
                    if BTUNE_DISABLE_THREADS {
                        tuner.reset_blocksize_on_clevel = tuner.readapt_from == ReadaptType::Hard;
                        State::Clevel
                    } else {
                        State::Threads
                    }
                } else {
                    State::ShuffleSize
                };
            }
        }
        // SHUFFLE_SIZE/THREADS/CLEVEL/BLOCKSIZE share the same
        // retry-before-exit shape: a failure on the very first candidate
        // tried on the axis just flips direction and retries; the axis
        // only exits on a second consecutive failure, or once it is
        // exhausted (`has_ended_*`).
        State::ShuffleSize => {
            let first_time = tuner.axis_attempts <= 1;
            if !improved {
                tuner.aux.increasing_shuffle = !tuner.aux.increasing_shuffle;
            }
            if tuner.has_ended_shuffle() || (!improved && !first_time) {
                tuner.axis_attempts = 0;
                tuner.state = if BTUNE_DISABLE_THREADS {
                    tuner.reset_blocksize_on_clevel = tuner.readapt_from == ReadaptType::Hard;
                    State::Clevel
                } else {
                    State::Threads
                };
            }
        }
        State::Threads => {
            let first_time = tuner.axis_attempts <= 1;
            if !improved {
                tuner.aux.increasing_nthreads = !tuner.aux.increasing_nthreads;
            }
            if tuner.has_ended_threads() || (!improved && !first_time) {
                tuner.axis_attempts = 0;
                tuner.reset_blocksize_on_clevel = tuner.readapt_from == ReadaptType::Hard;
                tuner.state = State::Clevel;
            }
        }
        State::Clevel => {
            let first_time = tuner.axis_attempts <= 1;
            if !improved {
                tuner.aux.increasing_clevel = !tuner.aux.increasing_clevel;
            }
            if tuner.has_ended_clevel() || (!improved && !first_time) {
                tuner.axis_attempts = 0;
                tuner.state = if BTUNE_DISABLE_BLOCKSIZE {
                    State::Memcpy
                } else {
                    State::Blocksize
                };
            }
        }
        State::Blocksize => {
            let first_time = tuner.axis_attempts <= 1;
            if !improved {
                tuner.aux.increasing_block = !tuner.aux.increasing_block;
            }
            if tuner.has_ended_blocksize() || (!improved && !first_time) {
                tuner.axis_attempts = 0;
                tuner.state = State::Memcpy;
            }
        }
        State::Memcpy => {
            tuner.state = State::Waiting;
        }
        State::Waiting | State::Stop => {}
    }
}

fn process_waiting_state(tuner: &mut Tuner) {
    let behaviour: Behaviour = tuner.config.behaviour;
    tuner.nwaitings += 1;
    if tuner.nwaitings < behaviour.nwaits_before_readapt {
        return;
    }
    tuner.nwaitings = 0;

    match tuner.readapt_from {
        ReadaptType::Hard => {
            tuner.nhards += 1;
            tuner.nsofts = 0;
            if tuner.nhards >= behaviour.nhards_before_stop {
                tuner.init_without_hards();
            } else {
                tuner.init_soft();
            }
        }
        ReadaptType::Soft => {
            tuner.nsofts += 1;
            if tuner.nsofts >= behaviour.nsofts_before_hard {
                tuner.nsofts = 0;
                // Last hard readapt before giving up: force the cheaper
                // step size so it converges quickly.
                tuner.step_size = SOFT_STEP_SIZE;
                tuner.init_hard();
            } else {
                tuner.init_soft();
            }
        }
        ReadaptType::Wait => {
            tuner.init_soft();
        }
    }
}

/// Feed back the measured compression time for the last candidate and
/// decide whether to keep it, then advance the state machine.
pub fn btune_update(cctx: &mut Blosc2Context, ctime: f64) -> i32 {
    let typesize = cctx.typesize;
    let destsize = cctx.destsize.max(0) as i64;
    let sourcesize = cctx.sourcesize.max(1) as f64;
    let Some(tuner) = tuner_mut(cctx) else {
        return BLOSC2_ERROR_TUNER;
    };

    let cbytes = destsize;
    let reduced_cbytes = cbytes as f64 / 1024.0;
    // Decompression timing is not collected in this pipeline; the
    // reference tuner hardcodes it to 0 as well.
    let dtime = 0.0;
    let cratio = sourcesize / cbytes.max(1) as f64;
    let score = tuner.score_function(ctime, dtime, reduced_cbytes);

    tuner.aux.ctime = ctime;
    tuner.aux.dtime = dtime;
    tuner.aux.cratio = cratio;
    tuner.aux.score = score;

    tuner.steps_count += 1;

    let (improved, winner) = if cbytes <= BLOSC2_MAX_OVERHEAD as i64 + typesize as i64 {
        (false, 'S')
    } else if tuner.state == State::Threads {
        // Threads are judged on raw timing, not the composite score: more
        // threads should only stick if they actually run faster.
        let better = match tuner.config.perf_mode {
            PerfMode::Decomp => dtime < tuner.best.dtime,
            _ => ctime < tuner.best.ctime,
        };
        (better, if better { 'W' } else { ' ' })
    } else {
        tuner.current_scores.push(score);
        tuner.current_cratios.push(cratio);
        let mean_score = Tuner::mean(&tuner.current_scores);
        let mean_cratio = Tuner::mean(&tuner.current_cratios);
        tuner.rep_index += 1;
        tuner.current_scores.clear();
        tuner.current_cratios.clear();
        let better = tuner.has_improved(mean_score, mean_cratio);
        (better, if better { 'W' } else { ' ' })
    };

    btune_log::log_candidate(tuner.state, tuner.readapt_from, winner, &tuner.aux);

    if improved {
        tuner.best = tuner.aux;
    }

    if tuner.state == State::Waiting {
        process_waiting_state(tuner);
    } else {
        update_aux(tuner, improved);
    }

    tuner.publish(cctx);
    BLOSC2_ERROR_SUCCESS
}

/// Tear down the tuner, releasing the boxed state stored in
/// `tuner_params`.
pub fn btune_free(cctx: &mut Blosc2Context) -> i32 {
    if cctx.tuner_params.is_null() {
        return BLOSC2_ERROR_SUCCESS;
    }
    // SAFETY: tuner_params only ever holds the pointer btune_init produced
    // via Box::into_raw, and this is the single place that reclaims it.
    unsafe {
        drop(Box::from_raw(cctx.tuner_params as *mut Tuner));
    }
    cctx.tuner_params = std::ptr::null_mut();
    cctx.tuner_id = 0;
    BLOSC2_ERROR_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_context() -> Blosc2Context {
        Blosc2Context {
            src: std::ptr::null(),
            dest: std::ptr::null_mut(),
            header_flags: 0,
            blosc2_flags: 0,
            sourcesize: 1 << 20,
            header_overhead: 0,
            nblocks: 0,
            leftover: 0,
            blocksize: 0,
            splitmode: BLOSC_ALWAYS_SPLIT as i32,
            output_bytes: 0,
            srcsize: 0,
            destsize: 0,
            typesize: 4,
            bstarts: std::ptr::null_mut(),
            special_type: 0,
            compcode: BLOSC_LZ4 as i32,
            compcode_meta: 0,
            clevel: 5,
            use_dict: 0,
            dict_buffer: std::ptr::null_mut(),
            dict_size: 0,
            dict_cdict: std::ptr::null_mut(),
            dict_ddict: std::ptr::null_mut(),
            filter_flags: 1,
            filters: [BLOSC_SHUFFLE, 0, 0, 0, 0, 0],
            filters_meta: [0; 6],
            urfilters: [crate::blosc::context::Blosc2Filter { _placeholder: 0 }; 4],
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
            nthreads: 4,
            new_nthreads: 4,
            threads_started: 0,
            end_threads: 0,
            threads: std::ptr::null_mut(),
            thread_contexts: std::ptr::null_mut(),
            thread_giveup_code: 0,
            thread_nblock: 0,
            dref_not_init: 0,
        }
    }

    #[test]
    fn init_then_free_round_trips_cleanly() {
        let mut cctx = fresh_context();
        assert_eq!(btune_init(Config::default(), &mut cctx, None), BLOSC2_ERROR_SUCCESS);
        assert!(!cctx.tuner_params.is_null());
        assert_eq!(btune_free(&mut cctx), BLOSC2_ERROR_SUCCESS);
        assert!(cctx.tuner_params.is_null());
    }

    #[test]
    fn double_init_is_rejected() {
        let mut cctx = fresh_context();
        assert_eq!(btune_init(Config::default(), &mut cctx, None), BLOSC2_ERROR_SUCCESS);
        assert_eq!(btune_init(Config::default(), &mut cctx, None), BLOSC2_ERROR_TUNER);
        btune_free(&mut cctx);
    }

    #[test]
    fn next_cparams_without_init_errors() {
        let mut cctx = fresh_context();
        assert_eq!(btune_next_cparams(&mut cctx), BLOSC2_ERROR_TUNER);
    }

    #[test]
    fn state_machine_reaches_waiting_then_stop_without_endless_growth() {
        let mut cctx = fresh_context();
        assert_eq!(btune_init(Config::default(), &mut cctx, None), BLOSC2_ERROR_SUCCESS);
        cctx.destsize = 1 << 19;

        let mut iterations = 0;
        loop {
            btune_next_cparams(&mut cctx);
            btune_update(&mut cctx, 0.01);
            let tuner = tuner_mut(&cctx).unwrap();
            iterations += 1;
            if tuner.state == State::Stop || iterations > 10_000 {
                break;
            }
            if tuner.state == State::Waiting {
                // One more update drives Waiting -> readapt or Stop.
                btune_update(&mut cctx, 0.01);
            }
        }
        assert!(iterations <= 10_000, "tuner never reached a terminal state");
        btune_free(&mut cctx);
    }

    #[test]
    fn special_value_chunk_is_never_marked_improved() {
        let mut cctx = fresh_context();
        btune_init(Config::default(), &mut cctx, None);
        cctx.destsize = BLOSC2_MAX_OVERHEAD as i32 + cctx.typesize;
        let before = tuner_mut(&cctx).unwrap().best;
        btune_update(&mut cctx, 0.01);
        let after = tuner_mut(&cctx).unwrap().best;
        assert_eq!(before.compcode, after.compcode);
        assert_eq!(before.clevel, after.clevel);
        btune_free(&mut cctx);
    }

    #[test]
    fn disabled_axes_never_move_off_their_seed_value() {
        let mut cctx = fresh_context();
        btune_init(Config::default(), &mut cctx, None);
        let tuner = tuner_mut(&cctx).unwrap();
        let seeded_threads = tuner.aux.nthreads_comp;
        let seeded_shuffle = tuner.aux.shufflesize;
        for _ in 0..64 {
            btune_next_cparams(&mut cctx);
            cctx.destsize = 1 << 18;
            btune_update(&mut cctx, 0.02);
        }
        let tuner = tuner_mut(&cctx).unwrap();
        assert_eq!(tuner.aux.nthreads_comp, seeded_threads);
        assert_eq!(tuner.aux.shufflesize, seeded_shuffle);
        btune_free(&mut cctx);
    }

    #[test]
    fn score_function_matches_perf_mode() {
        let cctx = fresh_context();
        let mut tuner = Tuner::new(Config::default(), &cctx);
        tuner.config.perf_mode = PerfMode::Comp;
        let s = tuner.score_function(1.0, 2.0, 1024.0);
        assert_eq!(s, 1.0 + 1024.0 / tuner.config.bandwidth as f64);

        tuner.config.perf_mode = PerfMode::Decomp;
        let s = tuner.score_function(1.0, 2.0, 1024.0);
        assert_eq!(s, 1024.0 / tuner.config.bandwidth as f64 + 2.0);

        tuner.config.perf_mode = PerfMode::Balanced;
        let s = tuner.score_function(1.0, 2.0, 1024.0);
        assert_eq!(s, 1.0 + 1024.0 / tuner.config.bandwidth as f64 + 2.0);
    }

    #[test]
    fn codec_filter_visits_every_triple_exactly_once_per_hard() {
        let cctx = fresh_context();
        let mut tuner = Tuner::new(Config::default(), &cctx);
        let total = tuner.codecs.len() * NUM_FILTERS * NUM_SPLITS;

        let mut seen = std::collections::HashSet::new();
        for _ in 0..total {
            assert!(!tuner.has_ended_codec_filter());
            tuner.advance_codec_filter();
            seen.insert((tuner.aux.compcode, tuner.aux.filter, tuner.aux.splitmode));
        }
        assert_eq!(seen.len(), total, "every (codec, filter, split) triple must be distinct");
        assert!(tuner.has_ended_codec_filter());
    }

    #[test]
    fn hcr_mode_never_selects_a_clevel_above_six() {
        let mut cctx = fresh_context();
        cctx.compcode = BLOSC_ZSTD as i32;
        let mut config = Config::default();
        config.comp_mode = CompMode::Hcr;
        assert_eq!(btune_init(config, &mut cctx, None), BLOSC2_ERROR_SUCCESS);

        let tuner = tuner_mut(&cctx).unwrap();
        assert_eq!(tuner.best.clevel, 8, "HCR mode seeds best.clevel at 8 before any candidate is tried");

        for _ in 0..40 {
            btune_next_cparams(&mut cctx);
            assert!(cctx.clevel <= 6, "HCR mode must never emit clevel > 6, got {}", cctx.clevel);
            cctx.destsize = 1 << 15;
            btune_update(&mut cctx, 0.05);
        }
        btune_free(&mut cctx);
    }

    #[test]
    fn balanced_mode_caps_zstd_and_zlib_clevel_at_three() {
        let mut cctx = fresh_context();
        cctx.compcode = BLOSC_ZSTD as i32;
        let mut config = Config::default();
        config.comp_mode = CompMode::Balanced;
        config.cparams_hint = true;
        assert_eq!(btune_init(config, &mut cctx, None), BLOSC2_ERROR_SUCCESS);

        for _ in 0..20 {
            btune_next_cparams(&mut cctx);
            if cctx.compcode == BLOSC_ZSTD as i32 || cctx.compcode == BLOSC_ZLIB as i32 {
                assert!(
                    cctx.clevel <= 3,
                    "BALANCED mode must cap ZSTD/ZLIB at clevel 3, got {}",
                    cctx.clevel
                );
            }
            cctx.destsize = 1 << 15;
            btune_update(&mut cctx, 0.05);
        }
        btune_free(&mut cctx);
    }

    #[test]
    fn soft_readapt_starts_in_clevel_not_codec_filter() {
        let cctx = fresh_context();
        let mut tuner = Tuner::new(Config::default(), &cctx);
        tuner.best.clevel = 5;
        tuner.init_soft();
        assert_eq!(tuner.state, State::Clevel);
        assert_eq!(tuner.readapt_from, ReadaptType::Soft);
    }
}
