pub mod models;

use std::sync::Arc;

use kelola_kernel::Module;
use kelola_resource::{Resource, ResourceModule};
use kelola_store::Store;

pub use models::{Book, BookDto, BookId};

/// Books inventory resource
pub struct BooksResource;

impl Resource for BooksResource {
    type Key = BookId;
    type Entity = Book;
    type Dto = BookDto;

    const NAME: &'static str = "books";
    const TAG: &'static str = "Books";

    fn to_dto(book: &Book) -> BookDto {
        BookDto {
            id: Some(book.id.clone()),
            name: book.name.clone(),
            price: book.price,
            category: book.category.clone(),
            author: book.author.clone(),
        }
    }

    fn from_dto(dto: BookDto) -> Book {
        Book {
            id: BookId::default(),
            name: dto.name,
            price: dto.price,
            category: dto.category,
            author: dto.author,
        }
    }

    fn apply_update(book: &mut Book, dto: BookDto) {
        book.name = dto.name;
        book.price = dto.price;
        book.category = dto.category;
        book.author = dto.author;
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn Store<Book>>) -> Arc<dyn Module> {
    Arc::new(ResourceModule::<BooksResource>::new(store))
}
