use crate::include;
use crate::include::blosc2_include::*;
use std::os::raw::c_void;
pub use crate::blosc::context::Blosc2Context;
pub use crate::blosc::blosc2::{Blosc2Cparams, Blosc2Dparams, BLOSC2_CPARAMS_DEFAULTS, BLOSC2_DPARAMS_DEFAULTS};



// Function signatures
pub fn blosc1_cbuffer_metainfo(
    cbuffer: &[u8],
) -> Option<(usize, i32)> {
    // TODO: Implement
    None
}

pub fn blosc1_cbuffer_validate(
    cbuffer: &[u8],
    cbytes: usize,
) -> Result<usize, ()> {
    // TODO: Implement
    Err(())
}

pub fn blosc1_cbuffer_sizes(
    cbuffer: &[u8],
) -> (usize, usize, usize) {
    crate::blosc::blosc2::blosc1_cbuffer_sizes(cbuffer)
}

pub fn blosc1_getitem(
    cbuffer: &[u8],
    start: i32,
    nitems: i32,
    dest: &mut [u8],
) -> i32 {
    // TODO: Implement
    0
}

pub fn blosc2_get_complib_info(
    compcode: &str,
) -> Option<(&'static str, &'static str, i32)> {
    // TODO: Implement
    None
}

pub fn blosc2_compress(
    clevel: i32,
    doshuffle: i32,
    typesize: usize,
    src: &[u8],
    dest: &mut [u8],
) -> i32 {
    crate::blosc::blosc2::blosc2_compress(clevel, doshuffle, typesize, src, dest)
}

pub fn blosc2_decompress(
    src: &[u8],
    dest: &mut [u8],
) -> i32 {
    crate::blosc::blosc2::blosc2_decompress(src, dest)
}

pub fn blosc2_create_cctx(cparams: Blosc2Cparams) -> Blosc2Context {
    crate::blosc::blosc2::blosc2_create_cctx(cparams)
}

pub fn blosc2_compress_ctx(
    context: &Blosc2Context,
    src: &[u8],
    dest: &mut [u8],
) -> i32 {
    crate::blosc::blosc2::blosc2_compress_ctx(context, src, dest)
}

pub fn blosc2_cbuffer_sizes(
    cbuffer: &[u8],
) -> (usize, usize, usize) {
    crate::blosc::blosc2::blosc2_cbuffer_sizes(cbuffer)
}

pub fn blosc2_create_dctx(dparams: Blosc2Dparams) -> Blosc2Context {
    // TODO: Implement in blosc2.rs
    Blosc2Context {
        src: std::ptr::null(),
        dest: std::ptr::null_mut(),
        header_flags: 0,
        blosc2_flags: 0,
        sourcesize: 0,
        header_overhead: 0,
        nblocks: 0,
        leftover: 0,
        blocksize: 0,
        splitmode: 0,
        output_bytes: 0,
        srcsize: 0,
        destsize: 0,
        typesize: 0,
        bstarts: std::ptr::null_mut(),
        special_type: 0,
        compcode: 0,
        compcode_meta: 0,
        clevel: 0,
        use_dict: 0,
        dict_buffer: std::ptr::null_mut(),
        dict_size: 0,
        dict_cdict: std::ptr::null_mut(),
        dict_ddict: std::ptr::null_mut(),
        filter_flags: 0,
        filters: [0; BLOSC2_MAX_FILTERS as usize],
        filters_meta: [0; BLOSC2_MAX_FILTERS as usize],
        urfilters: [crate::blosc::context::Blosc2Filter { _placeholder: 0 }; crate::blosc::context::BLOSC2_MAX_UDFILTERS],
        prefilter: std::ptr::null_mut(),
        postfilter: dparams.postfilter as *mut u8,
        preparams: std::ptr::null_mut(),
        postparams: dparams.postparams as *mut _,
        block_maskout: std::ptr::null_mut(),
        block_maskout_nitems: 0,
        schunk: dparams.schunk as *mut _,
        serial_context: std::ptr::null_mut(),
        do_compress: 0,
        tuner_params: std::ptr::null_mut(),
        tuner_id: 0,
        codec_params: std::ptr::null_mut(),
        filter_params: [std::ptr::null_mut(); BLOSC2_MAX_FILTERS as usize],
        nthreads: dparams.nthreads,
        new_nthreads: dparams.nthreads,
        threads_started: 0,
        end_threads: 0,
        threads: std::ptr::null_mut(),
        thread_contexts: std::ptr::null_mut(),
        thread_giveup_code: 0,
        thread_nblock: 0,
        dref_not_init: 0,
    }
}

pub fn blosc2_decompress_ctx(
    _context: &Blosc2Context,
    src: &[u8],
    dest: &mut [u8],
) -> i32 {
    // TODO: Implement in blosc2.rs
    0
}

