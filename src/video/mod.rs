/*!
 * Video compositing.
 *
 * - `style`: Caption appearance and ASS color conversion
 * - `compositor`: The `Compositor` seam and its ffmpeg implementation
 */

pub mod style;
pub mod compositor;

// Re-export main types
pub use compositor::{Compositor, CompositionJob, FfmpegCompositor};
pub use style::{CaptionPosition, SubtitleStyle};
