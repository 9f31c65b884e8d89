
pub mod api;
pub mod blosc;
pub mod include;
pub mod internal;

pub use api::*;
pub use crate::include::blosc2_include::*;

pub mod codecs {
    pub mod entropy_probe {
        use crate::blosc::entropy_probe;

        /// Register the entropy probe codec (id 244) in the process-wide
        /// codec table. Safe to call more than once.
        pub fn register() {
            entropy_probe::register();
        }

        /// Estimate the compressed size of `input` without compressing it.
        pub fn estimate_cbytes(input: &[u8]) -> usize {
            let cratio = entropy_probe::get_cratio(input, input.len(), 3, 3);
            entropy_probe::estimate_cbytes(input.len(), cratio)
        }
    }

    pub mod blosclz {
        use crate::blosc::blosclz;
        use crate::blosc::context::Blosc2Context;

        pub fn compress(clevel: i32, input: &[u8], output: &mut [u8]) -> usize {
            // Create a dummy context since it is unused in blosclz_compress
            let ctx = unsafe { std::mem::zeroed::<Blosc2Context>() };
            let maxout = output.len();
            let res = blosclz::blosclz_compress(clevel, input, output, maxout, &ctx);
            if res < 0 {
                0
            } else {
                res as usize
            }
        }

        pub fn decompress(input: &[u8], output: &mut [u8]) -> usize {
             let length = input.len();
             let maxout = output.len();
             let res = blosclz::blosclz_decompress(input, length, output, maxout);
             if res < 0 {
                 0
             } else {
                 res as usize
             }
        }
    }
}

pub mod filters {
    use crate::blosc::shuffle;

    pub fn bitshuffle(typesize: usize, blocksize: usize, src: &[u8], dest: &mut [u8]) -> Result<usize, i32> {
        let res = shuffle::blosc2_bitshuffle(typesize as i32, blocksize as i32, src, dest);
        if res < 0 {
            Err(res)
        } else {
            Ok(res as usize)
        }
    }

    pub fn bitunshuffle(typesize: usize, blocksize: usize, src: &[u8], dest: &mut [u8]) -> Result<usize, i32> {
        let res = shuffle::blosc2_bitunshuffle(typesize as i32, blocksize as i32, src, dest);
        if res < 0 {
            Err(res)
        } else {
            Ok(res as usize)
        }
    }
}