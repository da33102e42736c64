// cargo fuzz run decode corpus/decode -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

use imgmatrix::{Decoder, IndexMatrix};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(matrix) = text.parse::<IndexMatrix>() {
        let decoder = Decoder::default()
            .with_scale(3)
            .max_image_sz(Some(1 << 20));
        if let Ok(rendering) = decoder.decode(&matrix) {
            assert!(rendering.deficiency() <= matrix.max_index());
        }
    }
});
