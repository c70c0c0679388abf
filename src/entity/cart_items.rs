use sea_orm::entity::prelude::*;

/// One line of a visitor's cart, keyed by the session cookie. Rows expire
/// with the session: reads ignore anything past `expires_at`, and writes
/// purge expired rows opportunistically.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub session_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub cached_name: String,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub cached_price: Decimal,
    pub expires_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::menu_items::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_items::Column::Id"
    )]
    MenuItems,
}

impl Related<super::menu_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
