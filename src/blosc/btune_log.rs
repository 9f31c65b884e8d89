// Corresponds to the BTUNE_LOG / BTUNE_DEBUG tracing sprinkled through
// c-blosc2/plugins/tuners/btune/btune.c. Kept as bare env-gated eprintln!,
// matching the texture already used around this codebase (see the
// commented BLOSC_TRACE_WARNING call sites in blosc::stune).

use crate::blosc::btune_types::{Params, ReadaptType, State};

fn log_enabled() -> bool {
    std::env::var("BTUNE_LOG").is_ok()
}

fn debug_enabled() -> bool {
    std::env::var("BTUNE_DEBUG").is_ok()
}

/// One status line per evaluated candidate: state, what kind of readapt it
/// came from, winner marker, cparams and the measurements that drove the
/// improvement decision. `blocksize` is reported in KiB, matching the
/// reference's log format.
pub fn log_candidate(state: State, readapt_from: ReadaptType, winner: char, params: &Params) {
    if !log_enabled() {
        return;
    }
    eprintln!(
        "BTUNE: state: {:?} - readapt_from: {:?} - winner: {} - codec: {} - filter: {} \
         - splitmode: {} - clevel: {} - blocksize: {} KB - shufflesize: {} \
         - nthreads_comp: {} - nthreads_decomp: {} - ctime: {:.6} - dtime: {:.6} \
         - cratio: {:.3} - score: {:.6}",
        state,
        readapt_from,
        winner,
        params.compcode,
        params.filter,
        params.splitmode,
        params.clevel,
        params.blocksize / 1024,
        params.shufflesize,
        params.nthreads_comp,
        params.nthreads_decomp,
        params.ctime,
        params.dtime,
        params.cratio,
        params.score,
    );
}

/// A free-form trace line, only emitted when BTUNE_DEBUG is set.
pub fn debug(msg: &str) {
    if !debug_enabled() {
        return;
    }
    eprintln!("BTUNE_DEBUG: {}", msg);
}
