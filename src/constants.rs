// MIT License - Copyright (c) 2026 Peter Wright

/// Minimum classifier confidence for a frame to count as containing a cat.
pub const DEFAULT_CAT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Capacity of the broadcast channel used by [`crate::event::EventBroadcaster`].
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
