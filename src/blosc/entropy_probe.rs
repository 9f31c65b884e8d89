// Corresponds to c-blosc2/plugins/codecs/entropy_probe/blosc2_entropy_prober.c
//
// A specialized, non-emitting LZ-style scan that estimates the compressed
// size of a buffer without actually writing any compressed bytes. Used by
// btune's first-chunk inferencer to build (cratio, cspeed) features per
// block.

use std::collections::HashMap;
use std::sync::{Mutex, Once, OnceLock};

use crate::blosc::timestamp::{blosc_elapsed_secs, blosc_set_timestamp};

const HASH_LOG2: u32 = 12;
const MAX_COPY: i32 = 32;
const MAX_DISTANCE: i64 = 8191;
const MAX_FARDISTANCE: i64 = 65535 + MAX_DISTANCE - 1;

/// The codec id the entropy probe registers itself under.
pub const ENTROPY_PROBE_ID: u32 = 244;
pub const ENTROPY_PROBE_NAME: &str = "entropy_probe";

#[inline]
fn hash_function(seq: u32) -> usize {
    ((seq.wrapping_mul(2654435761u32)) >> (32 - HASH_LOG2)) as usize
}

#[inline]
fn get_run(ibase: &[u8], ip_start: usize, ip_bound: usize, ref_start: usize) -> usize {
    let x = ibase[ip_start - 1];
    let mut ip = ip_start;
    let mut r = ref_start;
    loop {
        if ip >= ip_bound {
            break;
        }
        let b = ibase[r];
        r += 1;
        if b == x {
            ip += 1;
        } else {
            break;
        }
    }
    ip
}

#[inline]
fn get_match(ibase: &[u8], ip_start: usize, ip_bound: usize, ref_start: usize) -> usize {
    let mut ip = ip_start;
    let mut r = ref_start;
    loop {
        if ip >= ip_bound {
            break;
        }
        let b = ibase[r];
        let a = ibase[ip];
        r += 1;
        ip += 1;
        if a != b {
            break;
        }
    }
    ip
}

#[inline]
fn get_run_or_match(ibase: &[u8], ip: usize, ip_bound: usize, ref_: usize, run: bool) -> usize {
    if run {
        get_run(ibase, ip, ip_bound, ref_)
    } else {
        get_match(ibase, ip, ip_bound, ref_)
    }
}

/// Get a guess for the compressed size of a buffer.
///
/// Returns `ic / oc`, the ratio of bytes scanned to estimated output bytes.
/// `minlen` and `ipshift` are the probe's tunable extension parameters;
/// (3, 3) are the reference defaults.
pub fn get_cratio(ibase: &[u8], maxlen: usize, minlen: i32, ipshift: i32) -> f32 {
    let hashlen: usize = 1 << HASH_LOG2;
    let mut htab = vec![0u32; hashlen];

    let limit = maxlen.min(hashlen);
    if limit < 12 {
        // Buffer too small for the main scan loop; treat as incompressible.
        return 1.0;
    }
    let ip_bound = limit - 1;
    let ip_limit = limit - 12;

    let mut ip: usize = 0;
    let mut oc: i64 = 5;
    let mut copy: i32 = 4;

    while ip < ip_limit {
        let mut anchor = ip;
        let seq = u32::from_ne_bytes(ibase[ip..ip + 4].try_into().unwrap());
        let hval = hash_function(seq);
        let ref_pos = htab[hval] as usize;
        let distance = (anchor - ref_pos) as i64;
        htab[hval] = anchor as u32;

        if distance == 0 || distance >= MAX_FARDISTANCE {
            oc += 1;
            anchor += 1;
            ip = anchor;
            copy += 1;
            if copy == MAX_COPY {
                copy = 0;
                oc += 1;
            }
            continue;
        }

        let matches_head = u32::from_ne_bytes(ibase[ref_pos..ref_pos + 4].try_into().unwrap())
            == u32::from_ne_bytes(ibase[ip..ip + 4].try_into().unwrap());
        let ref_after_head = if matches_head {
            ref_pos + 4
        } else {
            oc += 1;
            anchor += 1;
            ip = anchor;
            copy += 1;
            if copy == MAX_COPY {
                copy = 0;
                oc += 1;
            }
            continue;
        };

        ip = anchor + 4;
        let distance_biased = distance - 1;

        ip = get_run_or_match(ibase, ip, ip_bound, ref_after_head, distance_biased == 0);
        ip -= ipshift as usize;
        let len = (ip - anchor) as i32;

        if len < minlen {
            oc += 1;
            anchor += 1;
            ip = anchor;
            copy += 1;
            if copy == MAX_COPY {
                copy = 0;
                oc += 1;
            }
            continue;
        }

        if copy == 0 {
            oc -= 1;
        }
        copy = 0;

        if distance < MAX_DISTANCE {
            if len >= 7 {
                oc += ((len - 7) / 255 + 1) as i64;
            }
            oc += 2;
        } else {
            if len >= 7 {
                oc += ((len - 7) / 255 + 1) as i64;
            }
            oc += 4;
        }

        let seq = u32::from_ne_bytes(ibase[ip..ip + 4].try_into().unwrap());
        let hval = hash_function(seq);
        htab[hval] = ip as u32;
        ip += 1;
        oc += 1;
    }

    let ic = ip as f32;
    ic / (oc as f32)
}

/// Convert an estimated cratio into an estimated compressed size,
/// matching the entropy probe codec's `encoder()` trampoline.
pub fn estimate_cbytes(input_len: usize, cratio: f32) -> usize {
    let cbytes = (input_len as f32 / cratio) as usize;
    cbytes.min(input_len)
}

/// A single block's (cratio, cspeed) feature pair, analogous to a
/// `blosc2_instr` record produced by an instrumented compression pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockInstr {
    pub cratio: f32,
    pub cspeed: f32,
}

/// Probe one block, returning its (cratio, cspeed) feature pair.
///
/// `cspeed` is measured in bytes/second over the probe scan itself, which
/// stands in for the instrumented-codec timing the reference pipeline
/// would otherwise report.
pub fn probe_block(data: &[u8]) -> BlockInstr {
    let start = blosc_set_timestamp();
    let cratio = get_cratio(data, data.len(), 3, 3);
    let end = blosc_set_timestamp();
    let elapsed = blosc_elapsed_secs(start, end).max(f64::EPSILON);
    let cspeed = (data.len() as f64 / elapsed) as f32;
    BlockInstr { cratio, cspeed }
}

/// A minimal process-wide codec table, just enough to host the entropy
/// probe under its reserved id. `blusc` has no generic pluggable-codec
/// registry yet; this is the smallest one that satisfies that need without
/// generalizing beyond it.
pub struct CodecEntry {
    pub name: &'static str,
    pub encoder: fn(&[u8]) -> usize,
}

fn registry() -> &'static Mutex<HashMap<u32, CodecEntry>> {
    static REGISTRY: OnceLock<Mutex<HashMap<u32, CodecEntry>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

fn encoder(data: &[u8]) -> usize {
    estimate_cbytes(data.len(), get_cratio(data, data.len(), 3, 3))
}

static REGISTER_ONCE: Once = Once::new();

/// Register the entropy probe as codec 244. Idempotent: safe to call from
/// multiple call sites (e.g. once per `Tuner::init`) without double-booking
/// the registry entry.
pub fn register() {
    REGISTER_ONCE.call_once(|| {
        registry().lock().unwrap().insert(
            ENTROPY_PROBE_ID,
            CodecEntry {
                name: ENTROPY_PROBE_NAME,
                encoder,
            },
        );
    });
}

/// Look up the registered entropy probe encoder, for callers that want to
/// go through the generic codec table rather than calling `get_cratio`
/// directly.
pub fn lookup(id: u32) -> Option<fn(&[u8]) -> usize> {
    registry().lock().unwrap().get(&id).map(|entry| entry.encoder)
}
