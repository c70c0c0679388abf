pub mod cart_items;
pub mod contact_messages;
pub mod faqs;
pub mod feedback;
pub mod gallery_images;
pub mod menu_items;
pub mod newsletter_subscribers;
pub mod order_items;
pub mod orders;
pub mod reservations;
pub mod special_offers;
pub mod users;

pub use cart_items::Entity as CartItems;
pub use contact_messages::Entity as ContactMessages;
pub use faqs::Entity as Faqs;
pub use feedback::Entity as Feedback;
pub use gallery_images::Entity as GalleryImages;
pub use menu_items::Entity as MenuItems;
pub use newsletter_subscribers::Entity as NewsletterSubscribers;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use reservations::Entity as Reservations;
pub use special_offers::Entity as SpecialOffers;
pub use users::Entity as Users;
