//!
//! Cranelift-compiled callbacks.
//!
//! Produces genuinely JIT-compiled native code for the registration tests,
//! the same way a host runtime would: build IR for the SQLite callback
//! signature, import the `sqlite3_*` result/value helpers by symbol, finalize
//! and hand out the entry point as an integer address.
//!

use cranelift::prelude::*;
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{FuncId, Linkage, Module};
use rusqlite::ffi;

/// Compiled code plus the module that owns its memory
pub struct JitCallbacks {
    _module: JITModule,
    pub addresses: Vec<isize>,
}

fn create_isa() -> cranelift_codegen::isa::OwnedTargetIsa {
    let mut flag_builder = settings::builder();
    flag_builder.set("use_colocated_libcalls", "false").unwrap();
    flag_builder.set("is_pic", "false").unwrap();
    flag_builder.set("opt_level", "speed").unwrap();

    let isa_builder = cranelift_native::builder().expect("Failed to create ISA builder");
    isa_builder
        .finish(settings::Flags::new(flag_builder))
        .expect("Failed to create ISA")
}

fn new_module() -> JITModule {
    let mut builder = JITBuilder::with_isa(create_isa(), cranelift_module::default_libcall_names());

    builder.symbol("sqlite3_result_int64", ffi::sqlite3_result_int64 as *const u8);
    builder.symbol("sqlite3_value_int64", ffi::sqlite3_value_int64 as *const u8);
    builder.symbol(
        "sqlite3_aggregate_context",
        ffi::sqlite3_aggregate_context as *const u8,
    );

    JITModule::new(builder)
}

struct Imports {
    result_int64: FuncId,
    value_int64: FuncId,
    aggregate_context: FuncId,
}

fn declare_imports(module: &mut JITModule) -> Imports {
    let ptr = module.target_config().pointer_type();

    let mut sig = module.make_signature();
    sig.params.push(AbiParam::new(ptr));
    sig.params.push(AbiParam::new(types::I64));
    let result_int64 = module
        .declare_function("sqlite3_result_int64", Linkage::Import, &sig)
        .expect("Failed to declare sqlite3_result_int64");

    let mut sig = module.make_signature();
    sig.params.push(AbiParam::new(ptr));
    sig.returns.push(AbiParam::new(types::I64));
    let value_int64 = module
        .declare_function("sqlite3_value_int64", Linkage::Import, &sig)
        .expect("Failed to declare sqlite3_value_int64");

    let mut sig = module.make_signature();
    sig.params.push(AbiParam::new(ptr));
    sig.params.push(AbiParam::new(types::I32));
    sig.returns.push(AbiParam::new(ptr));
    let aggregate_context = module
        .declare_function("sqlite3_aggregate_context", Linkage::Import, &sig)
        .expect("Failed to declare sqlite3_aggregate_context");

    Imports {
        result_int64,
        value_int64,
        aggregate_context,
    }
}

/// `(sqlite3_context*, int, sqlite3_value**)`
fn args_signature(module: &JITModule) -> Signature {
    let ptr = module.target_config().pointer_type();
    let mut sig = module.make_signature();
    sig.params.push(AbiParam::new(ptr));
    sig.params.push(AbiParam::new(types::I32));
    sig.params.push(AbiParam::new(ptr));
    sig
}

/// `(sqlite3_context*)`
fn context_signature(module: &JITModule) -> Signature {
    let ptr = module.target_config().pointer_type();
    let mut sig = module.make_signature();
    sig.params.push(AbiParam::new(ptr));
    sig
}

/// Define `name` with `sig`, letting `emit` fill in the single entry block.
fn define(
    module: &mut JITModule,
    name: &str,
    sig: Signature,
    emit: impl FnOnce(&mut JITModule, &mut FunctionBuilder, &[Value]),
) -> FuncId {
    let func_id = module
        .declare_function(name, Linkage::Local, &sig)
        .unwrap_or_else(|e| panic!("Failed to declare '{}': {}", name, e));

    let mut ctx = module.make_context();
    ctx.func.signature = sig;

    let mut builder_ctx = FunctionBuilderContext::new();
    {
        let mut builder = FunctionBuilder::new(&mut ctx.func, &mut builder_ctx);
        let entry_block = builder.create_block();
        builder.append_block_params_for_function_params(entry_block);
        builder.switch_to_block(entry_block);
        builder.seal_block(entry_block);

        let params = builder.block_params(entry_block).to_vec();
        emit(module, &mut builder, &params);

        builder.ins().return_(&[]);
        builder.finalize();
    }

    module
        .define_function(func_id, &mut ctx)
        .unwrap_or_else(|e| panic!("Failed to define '{}': {}", name, e));
    module.clear_context(&mut ctx);

    func_id
}

fn finish(mut module: JITModule, ids: &[FuncId]) -> JitCallbacks {
    module
        .finalize_definitions()
        .expect("Failed to finalize JIT definitions");
    let addresses = ids
        .iter()
        .map(|&id| module.get_finalized_function(id) as isize)
        .collect();
    JitCallbacks {
        _module: module,
        addresses,
    }
}

/// Scalar that ignores its arguments and returns `value`.
pub fn constant_scalar(value: i64) -> JitCallbacks {
    let mut module = new_module();
    let imports = declare_imports(&mut module);
    let sig = args_signature(&module);

    let id = define(&mut module, "constant_scalar", sig, |module, builder, params| {
        let result = module.declare_func_in_func(imports.result_int64, builder.func);
        let constant = builder.ins().iconst(types::I64, value);
        builder.ins().call(result, &[params[0], constant]);
    });

    finish(module, &[id])
}

/// Scalar of arity 1 returning `argv[0] + delta` as an integer.
pub fn add_scalar(delta: i64) -> JitCallbacks {
    let mut module = new_module();
    let imports = declare_imports(&mut module);
    let sig = args_signature(&module);
    let ptr = module.target_config().pointer_type();

    let id = define(&mut module, "add_scalar", sig, |module, builder, params| {
        let value_int64 = module.declare_func_in_func(imports.value_int64, builder.func);
        let result = module.declare_func_in_func(imports.result_int64, builder.func);

        let first = builder.ins().load(ptr, MemFlags::trusted(), params[2], 0);
        let call = builder.ins().call(value_int64, &[first]);
        let arg = builder.inst_results(call)[0];
        let sum = builder.ins().iadd_imm(arg, delta);
        builder.ins().call(result, &[params[0], sum]);
    });

    finish(module, &[id])
}

/// Row-counting aggregate: `addresses[0]` is step, `addresses[1]` finalize.
///
/// Both callbacks ask for an 8-byte aggregate context, which SQLite zeroes
/// on first use, so finalize over an empty input reports 0.
pub fn count_aggregate() -> JitCallbacks {
    let mut module = new_module();
    let imports = declare_imports(&mut module);
    let step_sig = args_signature(&module);
    let final_sig = context_signature(&module);

    let step = define(&mut module, "count_step", step_sig, |module, builder, params| {
        let aggregate_context = module.declare_func_in_func(imports.aggregate_context, builder.func);
        let size = builder.ins().iconst(types::I32, 8);
        let call = builder.ins().call(aggregate_context, &[params[0], size]);
        let acc = builder.inst_results(call)[0];
        let count = builder.ins().load(types::I64, MemFlags::trusted(), acc, 0);
        let next = builder.ins().iadd_imm(count, 1);
        builder.ins().store(MemFlags::trusted(), next, acc, 0);
    });

    let finalize = define(&mut module, "count_final", final_sig, |module, builder, params| {
        let aggregate_context = module.declare_func_in_func(imports.aggregate_context, builder.func);
        let result = module.declare_func_in_func(imports.result_int64, builder.func);
        let size = builder.ins().iconst(types::I32, 8);
        let call = builder.ins().call(aggregate_context, &[params[0], size]);
        let acc = builder.inst_results(call)[0];
        let count = builder.ins().load(types::I64, MemFlags::trusted(), acc, 0);
        builder.ins().call(result, &[params[0], count]);
    });

    finish(module, &[step, finalize])
}
