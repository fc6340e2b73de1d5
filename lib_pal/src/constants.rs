pub const FILE_EXT: &str = "json";

/// Where converted documents land when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "PixelImages";
pub const DEFAULT_NAME: &str = "pixel_image";
