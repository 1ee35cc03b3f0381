pub mod admin_users;
pub mod categories;
pub mod extras;
pub mod order_item_extras;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod variants;

pub use admin_users::Entity as AdminUsers;
pub use categories::Entity as Categories;
pub use extras::Entity as Extras;
pub use order_item_extras::Entity as OrderItemExtras;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use variants::Entity as Variants;
