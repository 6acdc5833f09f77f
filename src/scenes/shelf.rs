use crate::config::BookshelfConfig;
use crate::error::SceneError;
use crate::scene::{Mesh, MeshStamp, NodeId, SceneBuilder, Transform};

pub fn add_bookshelf(
    builder: &mut SceneBuilder,
    shelf: &BookshelfConfig,
    name: &str,
) -> Result<NodeId, SceneError> {
    let group = builder.add_group(builder.root(), name, Transform::IDENTITY);
    let [x, z] = shelf.position;
    let [width, height, depth] = shelf.size;

    let body = Mesh::cuboid(width, height, depth, shelf.color)?;
    builder.add_mesh(group, format!("{}.body", name), body, Transform::from_xyz(x, height * 0.5, z));

    let [bw, bh, bd] = shelf.book_size;
    let books = MeshStamp::new(Mesh::cuboid(bw, bh, bd, shelf.book_color)?, shelf.first_book_height);
    for i in 0..shelf.books {
        let y = shelf.first_book_height + i as f32 * shelf.book_spacing;
        builder.add_placed(group, format!("{}.book.{}", name, i), books.at_height(x, y, z));
    }

    Ok(group)
}
