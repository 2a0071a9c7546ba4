use image::Rgb;

/// Class colors, chosen to stay distinguishable on foliage and soil backgrounds.
pub const PALETTE: [[u8; 3]; 20] = [
    [0, 114, 189],
    [217, 83, 25],
    [237, 177, 32],
    [126, 47, 142],
    [119, 172, 48],
    [77, 190, 238],
    [162, 20, 47],
    [255, 0, 0],
    [255, 128, 0],
    [191, 191, 0],
    [0, 255, 0],
    [0, 0, 255],
    [170, 0, 255],
    [85, 170, 0],
    [255, 85, 0],
    [0, 170, 128],
    [255, 0, 128],
    [0, 170, 255],
    [128, 64, 0],
    [85, 85, 255],
];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over the UTF-8 bytes of a class name.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

pub fn palette_index(class_id: &str) -> usize {
    (fnv1a(class_id.as_bytes()) % PALETTE.len() as u64) as usize
}

/// The display color of a class. The same name maps to the same color in every process.
pub fn class_color(class_id: &str) -> Rgb<u8> {
    Rgb(PALETTE[palette_index(class_id)])
}
