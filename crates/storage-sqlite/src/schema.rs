// Column names follow the datastore files already in use.

diesel::table! {
    vendas (id) {
        id -> BigInt,
        data_venda -> Nullable<Text>,
        plataforma -> Nullable<Text>,
        categoria -> Nullable<Text>,
        qtd_itens -> Nullable<Integer>,
        valor_total_venda -> Nullable<Double>,
        custo_total_produtos -> Nullable<Double>,
        taxa_plataforma_total -> Nullable<Double>,
        lucro_bruto -> Nullable<Double>,
        data_recebimento -> Nullable<Text>,
    }
}

diesel::table! {
    despesas (id) {
        id -> BigInt,
        data_despesa -> Nullable<Text>,
        categoria_despesa -> Nullable<Text>,
        descricao -> Nullable<Text>,
        valor_despesa -> Nullable<Double>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(vendas, despesas);
