// Corresponds to c-blosc2/plugins/tuners/btune/btune.h
//
// Plain data types shared between the public control surface (btune.rs),
// the inferencer (btune_model.rs) and the logger (btune_log.rs).

/// Bandwidth units, expressed in kB/s.
pub const BTUNE_KB: u32 = 1024;
pub const BTUNE_MBPS: u32 = BTUNE_KB;
pub const BTUNE_MBPS10: u32 = 10 * BTUNE_MBPS;
pub const BTUNE_MBPS100: u32 = 100 * BTUNE_MBPS;
pub const BTUNE_GBPS: u32 = BTUNE_MBPS * BTUNE_MBPS;
pub const BTUNE_GBPS10: u32 = 10 * BTUNE_MBPS * BTUNE_MBPS;

/// Compression mode: alters the improvement criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompMode {
    /// Optimizes the speed, even accepting memcpy.
    Hsp,
    /// Optimizes both the speed and compression ratio.
    Balanced,
    /// Optimizes the compression ratio.
    Hcr,
}

/// Performance mode: alters the scoring function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerfMode {
    /// Optimizes the compression and transmission times.
    Comp,
    /// Optimizes the decompression and transmission times.
    Decomp,
    /// Optimizes compression, transmission and decompression times.
    Balanced,
}

/// What btune does once the initial readaptations have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop improving.
    Stop,
    /// Repeat only the soft readapts continuously.
    RepeatSoft,
    /// Repeat the initial readaptations continuously.
    RepeatAll,
}

/// Number of initial hard readapts, soft readapts per hard, and waits before
/// each readapt.
#[derive(Debug, Clone, Copy)]
pub struct Behaviour {
    pub nwaits_before_readapt: u32,
    pub nsofts_before_hard: u32,
    pub nhards_before_stop: u32,
    pub repeat_mode: RepeatMode,
}

impl Default for Behaviour {
    fn default() -> Self {
        Behaviour {
            nwaits_before_readapt: 0,
            nsofts_before_hard: 5,
            nhards_before_stop: 1,
            repeat_mode: RepeatMode::Stop,
        }
    }
}

/// BTune configuration: determines how and towards what the Tuner optimizes.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// The bandwidth to optimize against, in kB/s.
    pub bandwidth: u32,
    pub perf_mode: PerfMode,
    pub comp_mode: CompMode,
    pub behaviour: Behaviour,
    /// When true, the caller-supplied cparams seed `best`/`aux` instead of
    /// the codec-list defaults.
    pub cparams_hint: bool,
}

impl Default for Config {
    /// Mirrors `BTUNE_CONFIG_DEFAULTS`: optimizes for memory bandwidth,
    /// compression speed, decompression speed and compression ratio.
    fn default() -> Self {
        Config {
            bandwidth: 2 * BTUNE_GBPS10,
            perf_mode: PerfMode::Balanced,
            comp_mode: CompMode::Balanced,
            behaviour: Behaviour::default(),
            cparams_hint: false,
        }
    }
}

/// Internal btune state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    CodecFilter,
    ShuffleSize,
    Threads,
    Clevel,
    Blocksize,
    Memcpy,
    Waiting,
    Stop,
}

/// What kind of readapt is currently underway (or `Wait`, when none is).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadaptType {
    Wait,
    Soft,
    Hard,
}

/// A single candidate (or winning) set of compression parameters, plus the
/// coordinate-descent direction flags and the measurements obtained when it
/// was last tried.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub compcode: u8,
    pub filter: u8,
    pub splitmode: i32,
    pub clevel: i32,
    pub blocksize: i32,
    pub shufflesize: i32,
    pub nthreads_comp: i32,
    pub nthreads_decomp: i32,

    pub increasing_clevel: bool,
    pub increasing_block: bool,
    pub increasing_shuffle: bool,
    pub increasing_nthreads: bool,

    pub score: f64,
    pub cratio: f64,
    pub ctime: f64,
    pub dtime: f64,
}

impl Default for Params {
    /// Mirrors `cparams_btune_default`.
    fn default() -> Self {
        use crate::include::blosc2_include::{BLOSC_ALWAYS_SPLIT, BLOSC_LZ4, BLOSC_SHUFFLE};
        Params {
            compcode: BLOSC_LZ4,
            filter: BLOSC_SHUFFLE,
            splitmode: BLOSC_ALWAYS_SPLIT as i32,
            clevel: 9,
            blocksize: 0,
            shufflesize: 0,
            nthreads_comp: 0,
            nthreads_decomp: 0,
            increasing_clevel: false,
            increasing_block: true,
            increasing_shuffle: true,
            increasing_nthreads: false,
            score: 100.0,
            cratio: 1.1,
            ctime: 100.0,
            dtime: 100.0,
        }
    }
}
