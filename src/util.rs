use crate::model::track::Thumbnail;

/// Picks the biggest image of the list, the first one wins on equal sizes.
pub fn reduce_thumbnails(list: &[Thumbnail]) -> Option<Thumbnail> {
    let mut best: Option<&Thumbnail> = None;

    for thumbnail in list {
        match best {
            Some(b) if b.area() >= thumbnail.area() => (),
            _ => best = Some(thumbnail)
        }
    }

    best.cloned()
}
