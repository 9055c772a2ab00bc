use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_base_categories_table::Migration),
            Box::new(m20240101_000003_create_categories_table::Migration),
            Box::new(m20240101_000004_create_brand_tables::Migration),
            Box::new(m20240101_000005_create_color_tables::Migration),
            Box::new(m20240101_000006_create_sizes_table::Migration),
            Box::new(m20240101_000007_create_category_attributes_table::Migration),
            Box::new(m20240101_000008_create_product_tables::Migration),
            Box::new(m20240101_000009_create_product_packages_table::Migration),
            Box::new(m20240101_000010_create_gallery_images_table::Migration),
            Box::new(m20240101_000011_create_comments_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_users_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Email).string().not_null())
                        .col(
                            ColumnDef::new(Users::IsStaff)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Username,
        Email,
        IsStaff,
        CreatedAt,
    }
}

mod m20240101_000002_create_base_categories_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_base_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BaseCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BaseCategories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BaseCategories::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(BaseCategories::EnName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(BaseCategories::Description).text().not_null())
                        .col(ColumnDef::new(BaseCategories::ImageUrl).string().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BaseCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum BaseCategories {
        Table,
        Id,
        Name,
        EnName,
        Description,
        ImageUrl,
    }
}

mod m20240101_000003_create_categories_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_base_categories_table::BaseCategories;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Categories::BaseCategoryId).uuid().not_null())
                        .col(ColumnDef::new(Categories::ParentId).uuid().null())
                        .col(
                            ColumnDef::new(Categories::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Categories::EnName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Categories::Description).text().not_null())
                        .col(ColumnDef::new(Categories::ImageUrl).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_categories_base_category")
                                .from(Categories::Table, Categories::BaseCategoryId)
                                .to(BaseCategories::Table, BaseCategories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_categories_parent")
                                .from(Categories::Table, Categories::ParentId)
                                .to(Categories::Table, Categories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_categories_base_category_id")
                        .table(Categories::Table)
                        .col(Categories::BaseCategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_categories_parent_id")
                        .table(Categories::Table)
                        .col(Categories::ParentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Categories {
        Table,
        Id,
        BaseCategoryId,
        ParentId,
        Name,
        EnName,
        Description,
        ImageUrl,
    }
}

mod m20240101_000004_create_brand_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_base_categories_table::BaseCategories;
    use super::m20240101_000003_create_categories_table::Categories;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_brand_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Brands::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Brands::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Brands::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Brands::EnName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Brands::LogoUrl).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BrandCategories::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(BrandCategories::BrandId).uuid().not_null())
                        .col(
                            ColumnDef::new(BrandCategories::CategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(BrandCategories::BrandId)
                                .col(BrandCategories::CategoryId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_brand_categories_brand")
                                .from(BrandCategories::Table, BrandCategories::BrandId)
                                .to(Brands::Table, Brands::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_brand_categories_category")
                                .from(BrandCategories::Table, BrandCategories::CategoryId)
                                .to(Categories::Table, Categories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BaseCategoryBrands::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BaseCategoryBrands::BaseCategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BaseCategoryBrands::BrandId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(BaseCategoryBrands::BaseCategoryId)
                                .col(BaseCategoryBrands::BrandId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_base_category_brands_base_category")
                                .from(
                                    BaseCategoryBrands::Table,
                                    BaseCategoryBrands::BaseCategoryId,
                                )
                                .to(BaseCategories::Table, BaseCategories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_base_category_brands_brand")
                                .from(BaseCategoryBrands::Table, BaseCategoryBrands::BrandId)
                                .to(Brands::Table, Brands::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BaseCategoryBrands::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BrandCategories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Brands::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Brands {
        Table,
        Id,
        Name,
        EnName,
        LogoUrl,
    }

    #[derive(DeriveIden)]
    pub(super) enum BrandCategories {
        Table,
        BrandId,
        CategoryId,
    }

    #[derive(DeriveIden)]
    pub(super) enum BaseCategoryBrands {
        Table,
        BaseCategoryId,
        BrandId,
    }
}

mod m20240101_000005_create_color_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_color_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BaseColors::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BaseColors::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BaseColors::Name).string().null())
                        .col(
                            ColumnDef::new(BaseColors::HexCode)
                                .string()
                                .not_null()
                                .default("#FFFFFF"),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Colors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Colors::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Colors::Name).string().not_null())
                        .col(ColumnDef::new(Colors::HexCode).string().not_null())
                        .col(ColumnDef::new(Colors::ImageUrl).string().null())
                        .col(ColumnDef::new(Colors::BaseColorId).uuid().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_colors_base_color")
                                .from(Colors::Table, Colors::BaseColorId)
                                .to(BaseColors::Table, BaseColors::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Colors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BaseColors::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum BaseColors {
        Table,
        Id,
        Name,
        HexCode,
    }

    #[derive(DeriveIden)]
    pub(super) enum Colors {
        Table,
        Id,
        Name,
        HexCode,
        ImageUrl,
        BaseColorId,
    }
}

mod m20240101_000006_create_sizes_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_sizes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sizes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sizes::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Sizes::Label).string().null())
                        .col(ColumnDef::new(Sizes::NumericSize).small_integer().null())
                        .col(ColumnDef::new(Sizes::NumericLabel).string().null())
                        .col(ColumnDef::new(Sizes::Group).string().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sizes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Sizes {
        Table,
        Id,
        Label,
        NumericSize,
        NumericLabel,
        Group,
    }
}

mod m20240101_000007_create_category_attributes_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000003_create_categories_table::Categories;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_category_attributes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CategoryAttributes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CategoryAttributes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CategoryAttributes::CategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CategoryAttributes::Name).string().not_null())
                        .col(
                            ColumnDef::new(CategoryAttributes::Title)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CategoryAttributes::Value).text().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_category_attributes_category")
                                .from(CategoryAttributes::Table, CategoryAttributes::CategoryId)
                                .to(Categories::Table, Categories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_category_attributes_category_id")
                        .table(CategoryAttributes::Table)
                        .col(CategoryAttributes::CategoryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CategoryAttributes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum CategoryAttributes {
        Table,
        Id,
        CategoryId,
        Name,
        Title,
        Value,
    }
}

mod m20240101_000008_create_product_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000003_create_categories_table::Categories;
    use super::m20240101_000007_create_category_attributes_table::CategoryAttributes;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_product_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Products::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Description).text().not_null())
                        .col(
                            ColumnDef::new(Products::IsActive)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Products::ImageUrl).string().null())
                        .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductCategories::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductCategories::CategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ProductCategories::ProductId)
                                .col(ProductCategories::CategoryId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_categories_product")
                                .from(ProductCategories::Table, ProductCategories::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_categories_category")
                                .from(ProductCategories::Table, ProductCategories::CategoryId)
                                .to(Categories::Table, Categories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductAttributes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductAttributes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAttributes::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductAttributes::AttributeId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductAttributes::Value).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_attributes_product")
                                .from(ProductAttributes::Table, ProductAttributes::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_attributes_attribute")
                                .from(ProductAttributes::Table, ProductAttributes::AttributeId)
                                .to(CategoryAttributes::Table, CategoryAttributes::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_attributes_product_id")
                        .table(ProductAttributes::Table)
                        .col(ProductAttributes::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductAttributes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductCategories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        Name,
        Description,
        IsActive,
        ImageUrl,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductCategories {
        Table,
        ProductId,
        CategoryId,
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductAttributes {
        Table,
        Id,
        ProductId,
        AttributeId,
        Value,
    }
}

mod m20240101_000009_create_product_packages_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000005_create_color_tables::Colors;
    use super::m20240101_000006_create_sizes_table::Sizes;
    use super::m20240101_000008_create_product_tables::Products;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_product_packages_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductPackages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductPackages::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductPackages::ProductId).uuid().not_null())
                        .col(ColumnDef::new(ProductPackages::SizeId).uuid().null())
                        .col(ColumnDef::new(ProductPackages::ColorId).uuid().null())
                        .col(ColumnDef::new(ProductPackages::Storage).string().null())
                        .col(
                            ColumnDef::new(ProductPackages::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::WeightGrams)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::IsActive)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::Price)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::Discount)
                                .small_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::IsActiveDiscount)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::FinalPrice)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::SoldCount)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::ViewsCount)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::Rating)
                                .double()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductPackages::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_packages_product")
                                .from(ProductPackages::Table, ProductPackages::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_packages_size")
                                .from(ProductPackages::Table, ProductPackages::SizeId)
                                .to(Sizes::Table, Sizes::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_packages_color")
                                .from(ProductPackages::Table, ProductPackages::ColorId)
                                .to(Colors::Table, Colors::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_packages_product_id")
                        .table(ProductPackages::Table)
                        .col(ProductPackages::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductPackages::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductPackages {
        Table,
        Id,
        ProductId,
        SizeId,
        ColorId,
        Storage,
        Quantity,
        WeightGrams,
        IsActive,
        Price,
        Discount,
        IsActiveDiscount,
        FinalPrice,
        SoldCount,
        ViewsCount,
        Rating,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000010_create_gallery_images_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000008_create_product_tables::Products;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_gallery_images_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GalleryImages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GalleryImages::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(GalleryImages::ProductId).uuid().not_null())
                        .col(ColumnDef::new(GalleryImages::ImageUrl).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_gallery_images_product")
                                .from(GalleryImages::Table, GalleryImages::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_gallery_images_product_id")
                        .table(GalleryImages::Table)
                        .col(GalleryImages::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(GalleryImages::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum GalleryImages {
        Table,
        Id,
        ProductId,
        ImageUrl,
    }
}

mod m20240101_000011_create_comments_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_users_table::Users;
    use super::m20240101_000008_create_product_tables::Products;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000011_create_comments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Comments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Comments::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Comments::ProductId).uuid().not_null())
                        .col(ColumnDef::new(Comments::UserId).uuid().not_null())
                        .col(ColumnDef::new(Comments::ParentId).uuid().null())
                        .col(ColumnDef::new(Comments::Body).text().not_null())
                        .col(ColumnDef::new(Comments::Rating).small_integer().not_null())
                        .col(
                            ColumnDef::new(Comments::IsApproved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Comments::CreatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_comments_product")
                                .from(Comments::Table, Comments::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_comments_user")
                                .from(Comments::Table, Comments::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_comments_parent")
                                .from(Comments::Table, Comments::ParentId)
                                .to(Comments::Table, Comments::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_comments_product_id")
                        .table(Comments::Table)
                        .col(Comments::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_comments_user_id")
                        .table(Comments::Table)
                        .col(Comments::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Comments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Comments {
        Table,
        Id,
        ProductId,
        UserId,
        ParentId,
        Body,
        Rating,
        IsApproved,
        CreatedAt,
    }
}
