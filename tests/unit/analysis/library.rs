//! Tests for candidate decoding, classification, and variant registration

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use mosaictile::MosaicError;
    use mosaictile::algorithm::control::{CancellationToken, ProgressSender, StageOutcome};
    use mosaictile::analysis::library::{AspectClass, PhotoLibrary};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_solid(path: &Path, width: u32, height: u32, color: [u8; 3]) {
        RgbImage::from_pixel(width, height, Rgb(color))
            .save(path)
            .unwrap();
    }

    fn index(paths: &[PathBuf], mirror: bool) -> StageOutcome<PhotoLibrary> {
        PhotoLibrary::index_photos(
            paths,
            mirror,
            &CancellationToken::new(),
            &ProgressSender::disabled(),
        )
        .unwrap()
    }

    // Tests decoding, discovery order, and mean color profiling
    #[test]
    fn test_index_profiles_candidates_in_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let red = temp_dir.path().join("red.png");
        let blue = temp_dir.path().join("blue.png");
        write_solid(&red, 16, 16, [255, 0, 0]);
        write_solid(&blue, 16, 16, [0, 0, 255]);

        let StageOutcome::Completed(library) = index(&[red.clone(), blue.clone()], false) else {
            panic!("indexing should complete");
        };

        assert_eq!(library.photo_count(), 2);
        let first = library.photos.first().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.path, red);
        assert!((first.average.r - 255.0).abs() < 1e-9);

        let second = library.photos.get(1).unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.path, blue);
        assert!((second.average.b - 255.0).abs() < 1e-9);
    }

    // Tests aspect classification from thumbnail dimensions
    #[test]
    fn test_aspect_classification() {
        let temp_dir = TempDir::new().unwrap();
        let wide = temp_dir.path().join("wide.png");
        let tall = temp_dir.path().join("tall.png");
        let square = temp_dir.path().join("square.png");
        write_solid(&wide, 40, 20, [1, 1, 1]);
        write_solid(&tall, 20, 40, [1, 1, 1]);
        write_solid(&square, 30, 30, [1, 1, 1]);

        let StageOutcome::Completed(library) = index(&[wide, tall, square], false) else {
            panic!("indexing should complete");
        };

        let aspects: Vec<_> = library.photos.iter().map(|photo| photo.aspect).collect();
        assert_eq!(
            aspects,
            vec![
                AspectClass::Landscape,
                AspectClass::Portrait,
                AspectClass::Square
            ]
        );
    }

    // Tests thumbnail downscaling to the bounded maximum side
    #[test]
    fn test_thumbnails_are_bounded() {
        let temp_dir = TempDir::new().unwrap();
        let large = temp_dir.path().join("large.png");
        write_solid(&large, 600, 300, [5, 5, 5]);

        let StageOutcome::Completed(library) = index(&[large], false) else {
            panic!("indexing should complete");
        };

        let photo = library.photos.first().unwrap();
        assert!(photo.thumbnail.width() <= 256);
        assert!(photo.thumbnail.height() <= 256);
        // Downscaling preserves aspect
        assert_eq!(photo.aspect, AspectClass::Landscape);
    }

    // Tests that decode failures are recorded and dropped, not fatal
    // Verified by propagating the decoder error instead of recording it
    #[test]
    fn test_decode_failures_are_recorded_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.png");
        let broken = temp_dir.path().join("broken.png");
        write_solid(&good, 16, 16, [9, 9, 9]);
        fs::write(&broken, "definitely not a png").unwrap();

        let StageOutcome::Completed(library) = index(&[broken.clone(), good], false) else {
            panic!("indexing should complete");
        };

        assert_eq!(library.photo_count(), 1);
        assert_eq!(library.failures.len(), 1);
        assert_eq!(library.failures.first().unwrap().path, broken);
        // Survivors are renumbered from zero
        assert_eq!(library.photos.first().unwrap().index, 0);
    }

    #[test]
    fn test_empty_pool_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let broken = temp_dir.path().join("broken.png");
        fs::write(&broken, "garbage").unwrap();

        let error = PhotoLibrary::index_photos(
            &[broken],
            false,
            &CancellationToken::new(),
            &ProgressSender::disabled(),
        )
        .unwrap_err();

        assert!(matches!(error, MosaicError::EmptyCellPool { attempted: 1 }));
    }

    // Tests variant ordering: photo by photo, unmirrored before mirrored
    // Verified by appending all mirrored variants after the plain ones
    #[test]
    fn test_mirror_variants_interleave_per_photo() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        let b = temp_dir.path().join("b.png");
        write_solid(&a, 16, 16, [1, 1, 1]);
        write_solid(&b, 16, 16, [2, 2, 2]);

        let StageOutcome::Completed(library) = index(&[a, b], true) else {
            panic!("indexing should complete");
        };

        let order: Vec<_> = library
            .variants
            .iter()
            .map(|variant| (variant.photo, variant.mirrored))
            .collect();
        assert_eq!(
            order,
            vec![(0, false), (0, true), (1, false), (1, true)]
        );
    }

    #[test]
    fn test_without_mirror_one_variant_per_photo() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        write_solid(&a, 16, 16, [1, 1, 1]);

        let StageOutcome::Completed(library) = index(&[a], false) else {
            panic!("indexing should complete");
        };
        assert_eq!(library.variants.len(), 1);
        assert!(!library.variants.first().unwrap().mirrored);
    }

    #[test]
    fn test_cancellation_short_circuits_indexing() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        write_solid(&a, 16, 16, [1, 1, 1]);

        let token = CancellationToken::new();
        token.cancel();

        let outcome = PhotoLibrary::index_photos(
            &[a],
            false,
            &token,
            &ProgressSender::disabled(),
        )
        .unwrap();
        assert!(matches!(outcome, StageOutcome::Cancelled));
    }
}
