//! Shared GPU helpers used by the renderers.

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

/// Rounds `size` up to a multiple of `alignment` (a power of two, as wgpu limits are).
#[inline]
pub(super) fn align_to(size: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    (size + alignment - 1) & !(alignment - 1)
}

/// Grown capacity for a per-frame buffer: next power of two, never below `floor`.
#[inline]
pub(super) fn grow_capacity(required: usize, floor: usize) -> usize {
    required.next_power_of_two().max(floor)
}

/// `size_of::<T>()` as a binding size, for types that are non-empty by construction.
pub(super) fn binding_size<T>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}
