use biblioteka::db;
use biblioteka::domain::CatalogError;
use biblioteka::models::{author, author_books, book, library};
use biblioteka::services::catalog_service::{
    add_author, add_book, add_book_to_library, add_library, delete_author, delete_book,
    delete_library, publish_book, publish_books, update_book,
};
use biblioteka::services::resolve::BookRef;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn find_book_by_title(db: &DatabaseConnection, title: &str) -> Option<book::Model> {
    book::Entity::find()
        .filter(book::Column::Title.eq(title))
        .one(db)
        .await
        .expect("query failed")
}

#[tokio::test]
async fn add_book_then_lookup_by_title() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Felix Dennis").await.expect("author");
    add_book(&db, "Jak zdobyć bogactwo", "biznes", &author, None)
        .await
        .expect("book");

    let found = find_book_by_title(&db, "Jak zdobyć bogactwo")
        .await
        .expect("book should exist");
    assert_eq!(found.genre, "biznes");
    assert_eq!(found.author_id, author.id);
}

#[tokio::test]
async fn duplicate_titles_from_different_authors_coexist() {
    let db = setup_test_db().await;

    let tim = add_author(&db, "Tim Ferriss").await.expect("author");
    let fake = add_author(&db, "Fakeman").await.expect("author");
    add_book(&db, "4-hour workweek", "business", &tim, None)
        .await
        .expect("book");
    add_book(&db, "4-hour workweek", "business", &fake, None)
        .await
        .expect("book");

    let copies = book::Entity::find()
        .filter(book::Column::Title.eq("4-hour workweek"))
        .all(&db)
        .await
        .expect("query");
    assert_eq!(copies.len(), 2);
    assert_ne!(copies[0].author_id, copies[1].author_id);
    assert_eq!(copies[0].genre, copies[1].genre);
}

#[tokio::test]
async fn duplicate_author_name_is_rejected() {
    let db = setup_test_db().await;

    add_author(&db, "Andrzej Sapkowski").await.expect("author");
    let err = add_author(&db, "Andrzej Sapkowski")
        .await
        .expect_err("duplicate should fail");
    assert!(matches!(err, CatalogError::UniquenessViolation(_)));
}

#[tokio::test]
async fn duplicate_library_location_is_rejected() {
    let db = setup_test_db().await;

    add_library(&db, "Plac Politechniki 1").await.expect("library");
    let err = add_library(&db, "Plac Politechniki 1")
        .await
        .expect_err("duplicate should fail");
    assert!(matches!(err, CatalogError::UniquenessViolation(_)));
}

#[tokio::test]
async fn empty_or_oversized_text_is_rejected() {
    let db = setup_test_db().await;

    let err = add_author(&db, "").await.expect_err("empty name");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));

    let long_name = "x".repeat(51);
    let err = add_author(&db, &long_name).await.expect_err("long name");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));

    let author = add_author(&db, "Sinek").await.expect("author");
    let long_genre = "g".repeat(26);
    let err = add_book(&db, "Zaczynaj od dlaczego", &long_genre, &author, None)
        .await
        .expect_err("long genre");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[tokio::test]
async fn empty_genre_is_allowed() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Sapkowski").await.expect("author");
    let book = add_book(&db, "Sezon burz", "", &author, None)
        .await
        .expect("empty genre is valid");
    assert_eq!(book.genre, "");
}

#[tokio::test]
async fn update_book_replaces_fields() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Sapkowski").await.expect("author");
    let library = add_library(&db, "Marszałkowska").await.expect("library");
    let book = add_book(&db, "Krew elfów", "fantasy", &author, None)
        .await
        .expect("book");

    let updated = update_book(&db, book.id, "Czas pogardy", "fantasy", Some(library.id))
        .await
        .expect("update");
    assert_eq!(updated.id, book.id);
    assert_eq!(updated.title, "Czas pogardy");
    assert_eq!(updated.library_id, Some(library.id));

    let stored = book::Entity::find_by_id(book.id)
        .one(&db)
        .await
        .expect("query")
        .expect("book");
    assert_eq!(stored.title, "Czas pogardy");
    assert_eq!(stored.author_id, author.id);
    assert_eq!(stored.library_id, Some(library.id));
}

#[tokio::test]
async fn update_missing_book_reports_not_found() {
    let db = setup_test_db().await;

    let err = update_book(&db, 42, "Sezon burz", "fantasy", None)
        .await
        .expect_err("missing");
    assert!(matches!(err, CatalogError::NotFound));
}

#[tokio::test]
async fn update_book_validates_text() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Sapkowski").await.expect("author");
    let book = add_book(&db, "Krew elfów", "fantasy", &author, None)
        .await
        .expect("book");

    let long_title = "t".repeat(51);
    let err = update_book(&db, book.id, &long_title, "fantasy", None)
        .await
        .expect_err("long title");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));

    let err = update_book(&db, book.id, "", "fantasy", None)
        .await
        .expect_err("empty title");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[tokio::test]
async fn publish_book_is_idempotent() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Sapkowski").await.expect("author");
    let book = add_book(&db, "Krew elfów", "fantasy", &author, None)
        .await
        .expect("book");

    publish_book(&db, &author, BookRef::Book(book.clone()))
        .await
        .expect("publish");
    publish_book(&db, &author, BookRef::Id(book.id))
        .await
        .expect("second publish is a no-op");

    let memberships = author_books::Entity::find()
        .filter(author_books::Column::AuthorId.eq(author.id))
        .count(&db)
        .await
        .expect("count");
    assert_eq!(memberships, 1);
}

#[tokio::test]
async fn publish_books_with_bad_element_adds_nothing() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Sapkowski").await.expect("author");
    let book = add_book(&db, "Krew elfów", "fantasy", &author, None)
        .await
        .expect("book");

    let err = publish_books(&db, &author, vec![BookRef::Book(book), BookRef::Id(999_999)])
        .await
        .expect_err("bad element should fail the batch");
    assert!(matches!(err, CatalogError::InvalidArgument(_)));

    // All-or-nothing: the valid first element was rolled back too
    let memberships = author_books::Entity::find()
        .filter(author_books::Column::AuthorId.eq(author.id))
        .count(&db)
        .await
        .expect("count");
    assert_eq!(memberships, 0);
}

#[tokio::test]
async fn publish_books_adds_all_valid_elements() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Tim Ferriss").await.expect("author");
    let book1 = add_book(&db, "4h workweek", "biznes", &author, None)
        .await
        .expect("book");
    let book2 = add_book(&db, "Narzędzia tytanów", "biznes", &author, None)
        .await
        .expect("book");

    publish_books(
        &db,
        &author,
        vec![BookRef::Book(book1), BookRef::Id(book2.id)],
    )
    .await
    .expect("publish");

    let published = author
        .find_related(book::Entity)
        .all(&db)
        .await
        .expect("related");
    assert_eq!(published.len(), 2);
}

#[tokio::test]
async fn holdings_are_independent_of_direct_library_field() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Tim Ferriss").await.expect("author");
    let shelf = add_library(&db, "Plac Narutowicza").await.expect("library");
    let other = add_library(&db, "Marszałkowska").await.expect("library");
    let book = add_book(&db, "4h workweek", "biznes", &author, Some(&shelf))
        .await
        .expect("book");

    // Cross-listed in a library it is not shelved in
    add_book_to_library(&db, &other, BookRef::Book(book.clone()))
        .await
        .expect("holding");

    let stored = book::Entity::find_by_id(book.id)
        .one(&db)
        .await
        .expect("query")
        .expect("book");
    assert_eq!(stored.library_id, Some(shelf.id));

    let holdings = stored
        .find_related(library::Entity)
        .all(&db)
        .await
        .expect("related");
    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].id, other.id);
}

#[tokio::test]
async fn deleting_author_cascades_to_books() {
    let db = setup_test_db().await;

    let author = add_author(&db, "Stephen King").await.expect("author");
    add_book(&db, "It", "horror", &author, None).await.expect("book");

    delete_author(&db, author.id).await.expect("delete");

    assert!(find_book_by_title(&db, "It").await.is_none());
    assert!(author::Entity::find_by_id(author.id)
        .one(&db)
        .await
        .expect("query")
        .is_none());
}

#[tokio::test]
async fn deleting_library_cascades_to_shelved_books() {
    let db = setup_test_db().await;

    let author = add_author(&db, "GaryVee").await.expect("author");
    let library = add_library(&db, "Złota 44").await.expect("library");
    add_book(&db, "Przebij się!", "biznes", &author, Some(&library))
        .await
        .expect("book");

    delete_library(&db, library.id).await.expect("delete");

    assert!(find_book_by_title(&db, "Przebij się!").await.is_none());
}

#[tokio::test]
async fn delete_missing_entities_report_not_found() {
    let db = setup_test_db().await;

    assert!(matches!(
        delete_author(&db, 42).await.expect_err("missing"),
        CatalogError::NotFound
    ));
    assert!(matches!(
        delete_library(&db, 42).await.expect_err("missing"),
        CatalogError::NotFound
    ));
    assert!(matches!(
        delete_book(&db, 42).await.expect_err("missing"),
        CatalogError::NotFound
    ));
}
