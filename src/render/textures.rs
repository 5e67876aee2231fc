//! Texture resolution with procedural fallbacks
//!
//! Each texture slot walks a candidate list of resource paths, exactly like
//! the original demos: try `.jpg`, then `.png`, then give up and paint a
//! procedural bitmap. All failures are recovered here; the scenes only ever
//! see a resolved handle.

use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use std::collections::HashMap;

use crate::scene::TextureSlot;

const EARTH_CANDIDATES: &[&str] = &["textures/earth.jpg", "textures/earth.png"];
const MOON_CANDIDATES: &[&str] = &["textures/moon.jpg", "textures/moon.png"];

/// Tolerated deviation from the 2:1 equirectangular aspect ratio.
const ASPECT_TOLERANCE: f32 = 0.05;

struct SlotState {
    candidates: &'static [&'static str],
    next_candidate: usize,
    pending: Option<(String, Handle<Image>)>,
    resolved: Option<Handle<Image>>,
}

impl SlotState {
    fn new(slot: TextureSlot) -> Self {
        Self {
            candidates: match slot {
                TextureSlot::Earth => EARTH_CANDIDATES,
                TextureSlot::Moon => MOON_CANDIDATES,
            },
            next_candidate: 0,
            pending: None,
            resolved: None,
        }
    }
}

/// Slot registry. Scenes insert this with the slots they reference; the
/// resolver fills in handles over the following frames.
#[derive(Resource, Default)]
pub struct TextureSlots {
    slots: HashMap<TextureSlot, SlotState>,
}

impl TextureSlots {
    pub fn for_slots(slots: &[TextureSlot]) -> Self {
        Self {
            slots: slots
                .iter()
                .map(|slot| (*slot, SlotState::new(*slot)))
                .collect(),
        }
    }

    /// Resolved image for `slot`, once loading (or falling back) finished.
    pub fn handle(&self, slot: TextureSlot) -> Option<Handle<Image>> {
        self.slots.get(&slot).and_then(|s| s.resolved.clone())
    }
}

/// System driving every unresolved slot one step: kick off the next
/// candidate load, poll it, and fall back to the procedural bitmap when
/// the candidate list runs dry. The fallback logs one warning per slot.
pub fn resolve_textures(
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut slots: ResMut<TextureSlots>,
) {
    for (slot, state) in slots.slots.iter_mut() {
        if state.resolved.is_some() {
            continue;
        }

        if let Some((path, handle)) = &state.pending {
            match asset_server.get_load_state(handle.id()) {
                Some(LoadState::Loaded) => {
                    if let Some(image) = images.get(handle) {
                        let (w, h) = (image.width(), image.height());
                        if !is_equirect_aspect(w, h) {
                            warn!("texture {path} is {w}x{h}, not ≈2:1 equirectangular");
                        }
                    }
                    state.resolved = state.pending.take().map(|(_, handle)| handle);
                }
                Some(LoadState::Failed(_)) => {
                    info!("failed to load texture {path}; trying next candidate");
                    state.pending = None;
                }
                _ => {}
            }
            continue;
        }

        loop {
            let Some(path) = state.candidates.get(state.next_candidate).copied() else {
                warn!("no usable texture for {slot:?}; using procedural fallback");
                let image = match slot {
                    TextureSlot::Earth => procedural_earth_image(),
                    TextureSlot::Moon => procedural_moon_image(),
                };
                state.resolved = Some(images.add(image));
                break;
            };
            state.next_candidate += 1;
            if !has_supported_extension(path) {
                info!("skipping texture {path}: unsupported extension");
                continue;
            }
            state.pending = Some((path.to_string(), asset_server.load(path.to_string())));
            break;
        }
    }
}

pub fn has_supported_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".png") || lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

pub fn is_equirect_aspect(width: u32, height: u32) -> bool {
    if height == 0 {
        return false;
    }
    (width as f32 / height as f32 / 2.0 - 1.0).abs() <= ASPECT_TOLERANCE
}

/// 512×256 stand-in Earth: deep-blue oceans and a dozen green blobs.
pub fn procedural_earth_image() -> Image {
    let (width, height) = (512u32, 256u32);
    let mut data = vec![0u8; (width * height * 4) as usize];
    fill(&mut data, [15, 40, 120, 255]);
    for i in 0..12u32 {
        let w = 30 + (i * 7) % 90;
        let h = 15 + (i * 5) % 60;
        let x = (i as f32 * 41.3) as u32 % (width - w);
        let y = (i as f32 * 23.7) as u32 % (height - h);
        fill_oval(&mut data, width, x, y, w, h, [20, 140, 60, 255]);
    }
    make_image(width, height, data)
}

/// 256×128 stand-in moon: gray with darker craters.
pub fn procedural_moon_image() -> Image {
    let (width, height) = (256u32, 128u32);
    let mut data = vec![0u8; (width * height * 4) as usize];
    fill(&mut data, [170, 170, 170, 255]);
    for i in 0..40u32 {
        let r = 3 + (i * 3) % 14;
        let x = (i as f32 * 19.1) as u32 % (width - r);
        let y = (i as f32 * 29.7) as u32 % (height - r);
        fill_oval(&mut data, width, x, y, r, r, [140, 140, 140, 255]);
    }
    make_image(width, height, data)
}

fn fill(data: &mut [u8], rgba: [u8; 4]) {
    for pixel in data.chunks_exact_mut(4) {
        pixel.copy_from_slice(&rgba);
    }
}

fn fill_oval(data: &mut [u8], stride: u32, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
    let cx = x as f32 + w as f32 / 2.0;
    let cy = y as f32 + h as f32 / 2.0;
    let rx = (w as f32 / 2.0).max(0.5);
    let ry = (h as f32 / 2.0).max(0.5);
    for py in y..y + h {
        for px in x..x + w {
            let nx = (px as f32 + 0.5 - cx) / rx;
            let ny = (py as f32 + 0.5 - cy) / ry;
            if nx * nx + ny * ny <= 1.0 {
                let offset = ((py * stride + px) * 4) as usize;
                data[offset..offset + 4].copy_from_slice(&rgba);
            }
        }
    }
}

fn make_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    let mut image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        mipmap_filter: ImageFilterMode::Linear,
        ..default()
    });
    image
}

/// Repeat-wrap linear sampler for loaded textures, installed as the image
/// plugin default in `main`.
pub fn equirect_sampler() -> ImageSamplerDescriptor {
    ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        mipmap_filter: ImageFilterMode::Linear,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(has_supported_extension("textures/earth.jpg"));
        assert!(has_supported_extension("textures/earth.JPEG"));
        assert!(has_supported_extension("a/b/c.png"));
        assert!(!has_supported_extension("textures/earth.bmp"));
        assert!(!has_supported_extension("textures/earth"));
    }

    #[test]
    fn test_equirect_aspect_tolerance() {
        assert!(is_equirect_aspect(512, 256));
        assert!(is_equirect_aspect(2048, 1024));
        // 4.9% off is tolerated, 10% is not.
        assert!(is_equirect_aspect(537, 256));
        assert!(!is_equirect_aspect(563, 256));
        assert!(!is_equirect_aspect(512, 512));
        assert!(!is_equirect_aspect(512, 0));
    }

    #[test]
    fn test_procedural_bitmap_dimensions() {
        let earth = procedural_earth_image();
        assert_eq!((earth.width(), earth.height()), (512, 256));
        let moon = procedural_moon_image();
        assert_eq!((moon.width(), moon.height()), (256, 128));
    }

    #[test]
    fn test_procedural_earth_has_land_and_sea() {
        let image = procedural_earth_image();
        let data = image.data.as_ref().expect("cpu-side image data");
        let mut sea = 0usize;
        let mut land = 0usize;
        for pixel in data.chunks_exact(4) {
            match pixel {
                [15, 40, 120, 255] => sea += 1,
                [20, 140, 60, 255] => land += 1,
                other => panic!("unexpected pixel {other:?}"),
            }
        }
        assert!(sea > land, "oceans should dominate");
        assert!(land > 0, "no landmass blobs were painted");
    }

    #[test]
    fn test_slot_registry_lookup() {
        let slots = TextureSlots::for_slots(&[TextureSlot::Earth]);
        assert!(slots.handle(TextureSlot::Earth).is_none());
        assert!(slots.handle(TextureSlot::Moon).is_none());
    }
}
